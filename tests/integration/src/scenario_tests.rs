//! Cross-crate scenarios
//!
//! Each test walks a realistic flow end to end: jars are written to a
//! temp directory, their manifests are read back through the archive
//! layer, and descriptors flow from extraction into resolution.

use std::path::{Path, PathBuf};

use optpkg_extension::{Extension, LibraryManifest, SpecificationCompatibility, extract};
use optpkg_manifest::Manifest;
use optpkg_resolve::{
    JarManifestSource, LocationResolver, ManifestSource, ResolutionChain, ResolveContext,
    ResolvedProperties,
};
use optpkg_test_utils::{JarDir, TestJar};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

const DEP_MANIFEST: &str = "Manifest-Version: 1.0\r\n\
    Created-By: 1.8.0 (Example)\r\n\
    Extension-Name: org.example.dep\r\n\
    Specification-Version: 2.1\r\n\
    Implementation-Vendor-Id: org.example\r\n\
    Implementation-Version: 2.1.4\r\n\
    \r\n\
    Name: org/example/dep/\r\n\
    Specification-Title: Example Dependency\r\n\
    Specification-Vendor: Example Corp\r\n\
    Specification-Version: 2.1\r\n\
    Implementation-Title: org.example.dep\r\n\
    Implementation-Version: 2.1.4\r\n\
    Implementation-Vendor: Example Corp\r\n\
    \r\n";

fn read(path: &Path) -> Manifest {
    JarManifestSource.open_manifest(path).unwrap()
}

/// Package an application jar that requires every extension of `deps`.
fn package_app(dir: &JarDir, deps: &[PathBuf]) -> PathBuf {
    let own = Extension::builder("org.example.app")
        .specification_version("1.0")
        .build()
        .unwrap();
    let mut library = LibraryManifest::new(own).created_by("scenario");
    for dep in deps {
        for extension in extract::available(&read(dep)).unwrap() {
            library = library.require(extension);
        }
    }
    let text = library.build().to_text().unwrap();
    dir.write("app.jar", &TestJar::with_manifest(text))
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_declared_dependencies_resolve_from_lib_dir() {
    let dir = JarDir::new();
    let dep = dir.write("build/dep.jar", &TestJar::with_manifest(DEP_MANIFEST));
    let app = package_app(&dir, &[dep]);
    dir.write("lib/dep.jar", &TestJar::with_manifest(DEP_MANIFEST));

    let required = extract::required(&read(&app)).unwrap();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].name(), "org.example.dep");

    let chain = ResolutionChain::new(ResolveContext::new(dir.root()))
        .resolver(Box::new(LocationResolver::new("missing/dep.jar")))
        .resolver(Box::new(LocationResolver::new("lib/dep.jar")));

    let mut properties = ResolvedProperties::new();
    let resolved = chain
        .resolve_property("dep.jar", &required[0], &mut properties)
        .unwrap();

    assert_eq!(resolved, Some(dir.path("lib/dep.jar")));
    assert_eq!(properties.get("dep.jar"), Some(dir.path("lib/dep.jar").as_path()));
}

#[test]
fn test_stale_dependency_rejected_on_verification() {
    let dir = JarDir::new();
    let dep = dir.write("build/dep.jar", &TestJar::with_manifest(DEP_MANIFEST));
    let app = package_app(&dir, &[dep]);
    dir.write("lib/dep.jar", &TestJar::extension("org.example.dep", Some("1.9")));

    let required = extract::required(&read(&app)).unwrap();
    let chain = ResolutionChain::new(ResolveContext::new(dir.root()))
        .resolver(Box::new(LocationResolver::new("lib/dep.jar")));
    assert!(chain.resolve(&required[0]).is_err());

    let unverified = ResolutionChain::new(ResolveContext::new(dir.root()))
        .verify(false)
        .resolver(Box::new(LocationResolver::new("lib/dep.jar")));
    assert_eq!(
        unverified.resolve(&required[0]).unwrap(),
        Some(dir.path("lib/dep.jar"))
    );
}

#[test]
fn test_specifications_survive_manifest_rewrite() {
    let dir = JarDir::new();
    let dep = dir.write("dep.jar", &TestJar::with_manifest(DEP_MANIFEST));
    let manifest = read(&dep);

    let rewritten: Manifest = manifest.to_text().unwrap().parse().unwrap();
    assert_eq!(rewritten, manifest);

    let before = extract::specifications(&manifest).unwrap();
    let after = extract::specifications(&rewritten).unwrap();
    assert_eq!(before, after);
    assert_eq!(
        before[0].compatibility_with(&after[0]),
        SpecificationCompatibility::Compatible
    );
}

#[test]
fn test_merged_manifest_keeps_both_declarations() {
    let base: Manifest = DEP_MANIFEST.parse().unwrap();
    let overlay: Manifest = "Manifest-Version: 1.0\r\n\
        Optional-Extension-List: opt\r\n\
        opt-Extension-Name: org.example.opt\r\n\
        \r\n"
        .parse()
        .unwrap();

    let mut merged = base.clone();
    merged.merge(&overlay, false, false).unwrap();

    let available = extract::available(&merged).unwrap();
    assert_eq!(available, extract::available(&base).unwrap());
    let optional = extract::optional(&merged).unwrap();
    assert_eq!(optional.len(), 1);
    assert_eq!(optional[0].name(), "org.example.opt");
}
