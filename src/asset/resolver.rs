//! Ordered asset path resolution.
//!
//! The game is normally run from the repository root, where relative paths
//! like `textures/font.png` and `shaders/ui/vert.glsl` exist. Run the binary
//! from anywhere else (its build directory, say) and those paths break, so
//! every request is tried against an ordered list of locations and the first
//! one that is actually readable wins.

use std::env;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::asset::exe_dir::{ExeLocator, OsExeLocator};

/// Environment variable naming the asset directory override.
pub const ASSET_DIR_ENV: &str = "HEXCRAFT_ASSET_DIR";

/// Resolves asset requests to readable paths on disk.
///
/// A request is tried against up to five locations, in order:
///
/// 1. the request as given,
/// 2. under the directory named by [`ASSET_DIR_ENV`], when set,
/// 3. under the executable's directory,
/// 4. under the executable's parent directory,
/// 5. under the executable's grandparent directory.
///
/// Locations 3 to 5 cover running a build straight out of its target
/// directory; location 2 covers everything else.
pub struct AssetResolver {
    asset_root: Option<PathBuf>,
    locator: Box<dyn ExeLocator>,
}

impl AssetResolver {
    /// Builds the production resolver: the override comes from the
    /// environment (an unset or empty variable disables it) and the
    /// executable location comes from the OS.
    pub fn from_env() -> Self {
        let asset_root = env::var_os(ASSET_DIR_ENV)
            .filter(|root| !root.is_empty())
            .map(PathBuf::from);
        Self::with_sources(asset_root, Box::new(OsExeLocator))
    }

    /// Builds a resolver from explicit sources. Tests use this to stand in
    /// a fake override and executable location without touching process
    /// globals.
    pub fn with_sources(asset_root: Option<PathBuf>, locator: Box<dyn ExeLocator>) -> Self {
        Self { asset_root, locator }
    }

    /// The executable directory as the resolver sees it.
    pub fn exe_dir(&self) -> Option<PathBuf> {
        self.locator.exe_dir()
    }

    /// Every location `request` may resolve to, in the order they are
    /// tried. An empty request has no candidates at all.
    pub fn candidates(&self, request: &str) -> Vec<PathBuf> {
        if request.is_empty() {
            return Vec::new();
        }
        let mut out = vec![PathBuf::from(request)];
        if let Some(root) = &self.asset_root {
            out.push(root.join(request));
        }
        if let Some(exe_dir) = self.locator.exe_dir() {
            out.push(exe_dir.join(request));
            out.push(exe_dir.join("..").join(request));
            out.push(exe_dir.join("..").join("..").join(request));
        }
        out
    }

    /// Resolves `request` to the first candidate that exists and is
    /// readable by this process, or `None` when every candidate fails.
    pub fn resolve(&self, request: &str) -> Option<PathBuf> {
        self.candidates(request)
            .into_iter()
            .find(|path| is_readable(path))
    }

    /// Resolves and reads `request` as UTF-8 text.
    pub fn load_string(&self, request: &str) -> Result<String, String> {
        let resolved = self.resolve(request);
        let path = resolved.as_deref().unwrap_or(Path::new(request));
        fs::read_to_string(path).map_err(|err| self.failure(request, resolved.as_deref(), &err))
    }

    /// Resolves and reads `request` as raw bytes.
    pub fn load_bytes(&self, request: &str) -> Result<Vec<u8>, String> {
        let resolved = self.resolve(request);
        let path = resolved.as_deref().unwrap_or(Path::new(request));
        fs::read(path).map_err(|err| self.failure(request, resolved.as_deref(), &err))
    }

    /// The operator-facing account of a failed load: what was asked for,
    /// where it was looked for, and how to fix the setup.
    fn failure(&self, request: &str, resolved: Option<&Path>, err: &io::Error) -> String {
        let tried = match resolved {
            Some(path) => path.display().to_string(),
            None => {
                let candidates = self.candidates(request);
                if candidates.is_empty() {
                    "(unresolved)".to_string()
                } else {
                    candidates
                        .iter()
                        .map(|path| path.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            }
        };
        let exe_dir = self
            .exe_dir()
            .map_or_else(|| "(unknown)".to_string(), |dir| dir.display().to_string());
        format!(
            "failed to read '{request}' (tried: {tried}; exe dir: {exe_dir}): {err}\n\
             Hint: run from the repo root, or set {ASSET_DIR_ENV} to the project directory."
        )
    }
}

/// A candidate counts as a hit when it can be opened for reading. Nothing
/// is read here.
fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::exe_dir::{FixedExeLocator, NoExeLocator};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn bare() -> AssetResolver {
        AssetResolver::with_sources(None, Box::new(NoExeLocator))
    }

    #[test]
    fn test_empty_request_fails_immediately() {
        let resolver = bare();
        assert!(resolver.candidates("").is_empty());
        assert_eq!(resolver.resolve(""), None);
        let err = resolver.load_string("").unwrap_err();
        assert!(err.contains("(unresolved)"));
    }

    #[test]
    fn test_candidates_in_documented_order() {
        let root = TempDir::new().unwrap();
        let exe = TempDir::new().unwrap();
        let resolver = AssetResolver::with_sources(
            Some(root.path().to_path_buf()),
            Box::new(FixedExeLocator(exe.path().to_path_buf())),
        );
        assert_eq!(
            resolver.candidates("a/b.png"),
            vec![
                PathBuf::from("a/b.png"),
                root.path().join("a/b.png"),
                exe.path().join("a/b.png"),
                exe.path().join("..").join("a/b.png"),
                exe.path().join("..").join("..").join("a/b.png"),
            ]
        );
    }

    #[test]
    fn test_join_adds_exactly_one_separator() {
        let resolver =
            AssetResolver::with_sources(Some(PathBuf::from("/opt/assets")), Box::new(NoExeLocator));
        let got = resolver.candidates("textures/font.png");
        assert_eq!(got[1], PathBuf::from("/opt/assets/textures/font.png"));

        // A root with a trailing separator must not double it.
        let resolver = AssetResolver::with_sources(
            Some(PathBuf::from("/opt/assets/")),
            Box::new(NoExeLocator),
        );
        let got = resolver.candidates("textures/font.png");
        assert!(!got[1].to_str().unwrap().contains("//"));
        assert_eq!(got[1], PathBuf::from("/opt/assets/textures/font.png"));
    }

    #[test]
    fn test_probe_failure_leaves_only_leading_candidates() {
        let resolver = bare();
        assert_eq!(resolver.candidates("x.png"), vec![PathBuf::from("x.png")]);
    }

    #[test]
    fn test_as_given_path_wins() {
        let dir = TempDir::new().unwrap();
        let direct = dir.path().join("direct.txt");
        touch(&direct);
        let resolver = bare();
        assert_eq!(
            resolver.resolve(direct.to_str().unwrap()),
            Some(direct.clone())
        );
    }

    #[test]
    fn test_env_root_beats_exe_dir() {
        let root = TempDir::new().unwrap();
        let base = TempDir::new().unwrap();
        let exe_dir = base.path().join("build").join("bin");
        touch(&root.path().join("both.txt"));
        touch(&exe_dir.join("both.txt"));
        let resolver = AssetResolver::with_sources(
            Some(root.path().to_path_buf()),
            Box::new(FixedExeLocator(exe_dir)),
        );
        assert_eq!(
            resolver.resolve("both.txt"),
            Some(root.path().join("both.txt"))
        );
    }

    #[test]
    fn test_exe_dir_chain_in_order() {
        let base = TempDir::new().unwrap();
        let exe_dir = base.path().join("build").join("bin");
        fs::create_dir_all(&exe_dir).unwrap();
        let resolver = |loc: &Path| {
            AssetResolver::with_sources(None, Box::new(FixedExeLocator(loc.to_path_buf())))
        };

        touch(&exe_dir.join("s3.txt"));
        assert_eq!(
            resolver(&exe_dir).resolve("s3.txt"),
            Some(exe_dir.join("s3.txt"))
        );

        touch(&base.path().join("build").join("s4.txt"));
        let got = resolver(&exe_dir).resolve("s4.txt").unwrap();
        assert_eq!(got, exe_dir.join("..").join("s4.txt"));
        assert!(fs::read(&got).is_ok());

        touch(&base.path().join("s5.txt"));
        assert_eq!(
            resolver(&exe_dir).resolve("s5.txt"),
            Some(exe_dir.join("..").join("..").join("s5.txt"))
        );

        // When more than one location holds the file, the nearest wins.
        touch(&exe_dir.join("s5.txt"));
        assert_eq!(
            resolver(&exe_dir).resolve("s5.txt"),
            Some(exe_dir.join("s5.txt"))
        );
    }

    #[test]
    fn test_load_string_reads_resolved_file() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("greeting.txt"), "hello").unwrap();
        let resolver =
            AssetResolver::with_sources(Some(root.path().to_path_buf()), Box::new(NoExeLocator));
        assert_eq!(resolver.load_string("greeting.txt").unwrap(), "hello");
    }

    #[test]
    fn test_missing_asset_reports_every_attempt() {
        let resolver = AssetResolver::with_sources(
            Some(PathBuf::from("/no/such/root")),
            Box::new(NoExeLocator),
        );
        assert_eq!(resolver.resolve("missing.glsl"), None);
        let err = resolver.load_string("missing.glsl").unwrap_err();
        assert!(err.contains("missing.glsl"));
        assert!(err.contains("/no/such/root"));
        assert!(err.contains("(unknown)"));
        assert!(err.contains(ASSET_DIR_ENV));
    }
}
