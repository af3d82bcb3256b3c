//! Descriptor extraction from realistic manifests.

use optpkg_extension::{Compatibility, Extension, Specification, extract};
use optpkg_manifest::Manifest;
use pretty_assertions::assert_eq;

const SERVLET_MANIFEST: &str = "Manifest-Version: 1.0\r\n\
Created-By: 1.4.2 (Example Corp.)\r\n\
Extension-Name: javax.servlet\r\n\
Specification-Vendor: Example Foundation\r\n\
Specification-Version: 2.4 \r\n\
Implementation-Vendor-Id: org.example\r\n\
Implementation-Vendor: Example Corp\r\n\
Implementation-Version: 2.4.1\r\n\
Extension-List: xml\r\n\
xml-Extension-Name: javax.xml\r\n\
xml-Specification-Version: 1.3\r\n\
\r\n\
Name: javax/servlet/\r\n\
Specification-Title: Java API for Servlets\r\n\
Specification-Version: 2.4\r\n\
Specification-Vendor: Example Foundation\r\n\
Implementation-Title: javax.servlet\r\n\
Implementation-Version: 2.4.1 build 7\r\n\
Implementation-Vendor: Example Corp\r\n\
\r\n\
Name: javax/servlet/http/\r\n\
Specification-Title: Java API for Servlets\r\n\
Specification-Version: 2.4.0\r\n\
Specification-Vendor: Example Foundation\r\n\
Implementation-Title: javax.servlet\r\n\
Implementation-Version: 2.4.1 build 7\r\n\
Implementation-Vendor: Example Corp\r\n\
\r\n\
Name: javax/servlet/resources/\r\n\
Content-Type: text/plain\r\n\
\r\n";

fn manifest() -> Manifest {
    SERVLET_MANIFEST.parse().unwrap()
}

#[test]
fn test_available_extension_fields_trimmed() {
    let available = extract::available(&manifest()).unwrap();
    assert_eq!(available.len(), 1);

    let expected = Extension::builder("javax.servlet")
        .specification_vendor("Example Foundation")
        .specification_version("2.4")
        .implementation_vendor_id("org.example")
        .implementation_vendor("Example Corp")
        .implementation_version("2.4.1")
        .build()
        .unwrap();
    assert_eq!(available[0], expected);
}

#[test]
fn test_required_extension_listed_by_token() {
    let required = extract::required(&manifest()).unwrap();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].name(), "javax.xml");
    assert_eq!(required[0].to_string(), "Extension-Name: javax.xml\nSpecification-Version: 1.3\n");
}

#[test]
fn test_specifications_merged_across_sections() {
    let specifications = extract::specifications(&manifest()).unwrap();
    assert_eq!(specifications.len(), 1);

    let expected = Specification::builder("Java API for Servlets")
        .specification_version("2.4")
        .specification_vendor("Example Foundation")
        .implementation_title("javax.servlet")
        .implementation_version("2.4.1 build 7")
        .implementation_vendor("Example Corp")
        .section("javax/servlet/")
        .section("javax/servlet/http/")
        .build()
        .unwrap();
    assert_eq!(specifications[0], expected);
}

#[test]
fn test_available_satisfies_requirement() {
    let available = extract::available(&manifest()).unwrap();
    let required = Extension::builder("javax.servlet")
        .specification_version("2.3")
        .implementation_vendor_id("org.example")
        .build()
        .unwrap();
    assert_eq!(available[0].classify(&required), Compatibility::Compatible);

    let newer = Extension::builder("javax.servlet")
        .specification_version("2.5")
        .build()
        .unwrap();
    assert_eq!(
        available[0].classify(&newer),
        Compatibility::RequireSpecificationUpgrade
    );
}
