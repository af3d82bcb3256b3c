//! Resolver that fetches the archive from a URL

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use optpkg_extension::Extension;
use url::Url;

use crate::context::ResolveContext;
use crate::error::{Error, Result};
use crate::resolver::ExtensionResolver;

/// Network timeout for archive downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Where a fetched archive is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlDestination {
    /// Store under exactly this path.
    File(PathBuf),
    /// Store in this directory under the last path segment of the URL.
    Dir(PathBuf),
}

/// Fetches an archive from a `file://`, `http://` or `https://` URL.
///
/// The destination is always re-fetched, even if it already exists.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    url: String,
    destination: UrlDestination,
}

impl UrlResolver {
    pub fn new(url: impl Into<String>, destination: UrlDestination) -> Self {
        Self {
            url: url.into(),
            destination,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Resolver {
            resolver: self.to_string(),
            message: message.into(),
        }
    }

    fn parse(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| self.error(format!("invalid URL: {e}")))
    }

    fn destination(&self, url: &Url, context: &ResolveContext) -> Result<PathBuf> {
        match &self.destination {
            UrlDestination::File(path) => Ok(context.resolve_path(path)),
            UrlDestination::Dir(dir) => {
                let name = file_name(url)
                    .ok_or_else(|| self.error("URL has no file name to store under"))?;
                Ok(context.resolve_path(dir).join(name))
            }
        }
    }

    fn fetch(&self, url: &Url, dest: &Path) -> Result<()> {
        match url.scheme() {
            "file" => {
                let source = url
                    .to_file_path()
                    .map_err(|()| self.error("not a local file URL"))?;
                fs::copy(&source, dest).map_err(|e| Error::file(&source, e))?;
                Ok(())
            }
            "http" | "https" => download_to_file(url, dest),
            scheme => Err(self.error(format!("unsupported URL scheme '{scheme}'"))),
        }
    }
}

impl fmt::Display for UrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URL[{}]", self.url)
    }
}

impl ExtensionResolver for UrlResolver {
    fn resolve(&self, _extension: &Extension, context: &ResolveContext) -> Result<Option<PathBuf>> {
        let url = self.parse()?;
        let dest = self.destination(&url, context)?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::file(parent, e))?;
        }
        tracing::info!(url = %url, dest = %dest.display(), "fetching archive");
        self.fetch(&url, &dest)?;
        Ok(Some(dest))
    }
}

/// The last path segment of a URL, as written (still percent-encoded).
fn file_name(url: &Url) -> Option<&str> {
    url.path_segments()?.last().filter(|name| !name.is_empty())
}

fn download_to_file(url: &Url, dest: &Path) -> Result<()> {
    let response = http_agent()
        .get(url.as_str())
        .call()
        .map_err(|e| map_ureq_error(url.as_str(), &e))?;
    write_body(response.into_body().as_reader(), dest)
}

/// Copy `body` into `dest`. A partially written file is removed.
fn write_body<R: Read>(mut body: R, dest: &Path) -> Result<()> {
    let mut file = File::create(dest).map_err(|e| Error::file(dest, e))?;
    if let Err(e) = io::copy(&mut body, &mut file) {
        drop(file);
        if let Err(remove) = fs::remove_file(dest) {
            tracing::warn!(path = %dest.display(), error = %remove, "failed to remove partial download");
        }
        return Err(Error::file(dest, e));
    }
    Ok(())
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

fn map_ureq_error(url: &str, err: &ureq::Error) -> Error {
    let reason = match err {
        ureq::Error::StatusCode(404) => "not found".to_string(),
        other => other.to_string(),
    };
    Error::Download {
        url: url.to_owned(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn extension() -> Extension {
        Extension::builder("org.example.foo").build().unwrap()
    }

    #[rstest]
    #[case("https://example.org/dist/foo.jar", Some("foo.jar"))]
    #[case("https://example.org/foo.jar?x=1#frag", Some("foo.jar"))]
    #[case("file:///tmp/lib/foo.jar", Some("foo.jar"))]
    #[case("https://example.org/dist/", None)]
    #[case("https://example.org", None)]
    fn test_file_name(#[case] url: &str, #[case] expected: Option<&str>) {
        let url = Url::parse(url).unwrap();
        assert_eq!(file_name(&url), expected);
    }

    #[test]
    fn test_file_url_copied_into_destdir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.jar");
        fs::write(&source, b"jar bytes").unwrap();
        let ctx = ResolveContext::new(temp.path());
        let url = Url::from_file_path(&source).unwrap();

        let resolver =
            UrlResolver::new(url.to_string(), UrlDestination::Dir(PathBuf::from("cache")));
        let resolved = resolver.resolve(&extension(), &ctx).unwrap().unwrap();

        assert_eq!(resolved, temp.path().join("cache").join("source.jar"));
        assert_eq!(fs::read(&resolved).unwrap(), b"jar bytes");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_percent_escapes_decoded() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("my lib")).unwrap();
        fs::write(temp.path().join("my lib/foo.jar"), b"spaced").unwrap();
        let ctx = ResolveContext::new(temp.path());

        let resolver = UrlResolver::new(
            format!("file://{}/my%20lib/foo.jar", temp.path().display()),
            UrlDestination::Dir(PathBuf::from("cache")),
        );
        let resolved = resolver.resolve(&extension(), &ctx).unwrap().unwrap();

        assert_eq!(resolved, temp.path().join("cache/foo.jar"));
        assert_eq!(fs::read(&resolved).unwrap(), b"spaced");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_with_localhost_authority() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("foo.jar");
        fs::write(&source, b"local").unwrap();
        let ctx = ResolveContext::new(temp.path());

        let resolver = UrlResolver::new(
            format!("file://localhost{}", source.display()),
            UrlDestination::File(PathBuf::from("out/foo.jar")),
        );
        let resolved = resolver.resolve(&extension(), &ctx).unwrap().unwrap();

        assert_eq!(fs::read(resolved).unwrap(), b"local");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_url_with_remote_host_rejected() {
        let temp = TempDir::new().unwrap();
        let ctx = ResolveContext::new(temp.path());
        let resolver = UrlResolver::new(
            "file://fileserver/share/foo.jar",
            UrlDestination::File(PathBuf::from("foo.jar")),
        );
        let err = resolver.resolve(&extension(), &ctx).unwrap_err();
        assert!(err.to_string().contains("not a local file URL"));
    }

    #[test]
    fn test_existing_destination_refetched() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source.jar");
        fs::write(&source, b"new").unwrap();
        fs::write(temp.path().join("dest.jar"), b"old").unwrap();
        let ctx = ResolveContext::new(temp.path());

        let resolver = UrlResolver::new(
            Url::from_file_path(&source).unwrap().to_string(),
            UrlDestination::File(PathBuf::from("dest.jar")),
        );
        let resolved = resolver.resolve(&extension(), &ctx).unwrap().unwrap();
        assert_eq!(fs::read(resolved).unwrap(), b"new");
    }

    #[test]
    fn test_missing_file_url_is_error() {
        let temp = TempDir::new().unwrap();
        let ctx = ResolveContext::new(temp.path());
        let missing = Url::from_file_path(temp.path().join("nonexistent/foo.jar")).unwrap();
        let resolver = UrlResolver::new(
            missing.to_string(),
            UrlDestination::File(PathBuf::from("foo.jar")),
        );
        assert!(matches!(
            resolver.resolve(&extension(), &ctx),
            Err(Error::File { .. })
        ));
    }

    #[rstest]
    #[case::unsupported_scheme("ftp://example.org/foo.jar", "unsupported URL scheme 'ftp'")]
    #[case::relative("lib/foo.jar", "invalid URL")]
    fn test_unusable_url(#[case] url: &str, #[case] message: &str) {
        let temp = TempDir::new().unwrap();
        let ctx = ResolveContext::new(temp.path());
        let resolver = UrlResolver::new(url, UrlDestination::File(PathBuf::from("foo.jar")));
        let err = resolver.resolve(&extension(), &ctx).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }

    /// Yields some bytes, then fails.
    struct Interrupted {
        sent: bool,
    }

    impl Read for Interrupted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.sent = true;
            let chunk = b"partial";
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_interrupted_body_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("foo.jar");

        let err = write_body(Interrupted { sent: false }, &dest).unwrap_err();
        assert!(matches!(err, Error::File { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_complete_body_written() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("foo.jar");
        write_body(&b"whole archive"[..], &dest).unwrap();
        assert_eq!(fs::read(dest).unwrap(), b"whole archive");
    }

    #[test]
    fn test_map_ureq_error_404() {
        let err = map_ureq_error("https://example.org/x.jar", &ureq::Error::StatusCode(404));
        assert_eq!(
            err.to_string(),
            "download failed for https://example.org/x.jar: not found"
        );
    }
}
