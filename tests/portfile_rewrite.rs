// tests/portfile_rewrite.rs

//! End-to-end Portfile rewrites
//!
//! These tests run whole Portfiles through the rewrite pass with the
//! ecosystem formatters, checking the exact output text.

mod common;

use common::{package, tarball, version_bump};
use portup::portfile::{rewrite, PortfileRewriter};
use portup::{Archive, ArchiveFormat, Frontend, PackageDiff, Phase, Requirement};

fn identity(req: &Requirement) -> String {
    req.name.clone()
}

#[test]
fn test_update_beautifulsoup() {
    let old_portfile = r#"version 4.6.0

checksums           rmd160  6452de577ef676636fb0be79eba9224cafd5622d \
                    size    160846
if {${name} ne ${subport}} {
    depends_lib-append  port:py${python.version}-setuptools
}
"#;
    let expected = r#"version 4.9.1

checksums           rmd160  b72ed53263f07c843ce34513a9d62128051e2fc3 \
                    size    374759
if {${name} ne ${subport}} {
    depends_lib-append  port:py${python.version}-setuptools \
                        port:py${python.version}-soupsieve
}
"#;
    let mut old = package("beautifulsoup4", "4.6.0", &[]);
    old.archives
        .push(tarball("6452de577ef676636fb0be79eba9224cafd5622d", 160846));
    let mut new = package("beautifulsoup4", "4.9.1", &[(Phase::Run, &["soupsieve"])]);
    new.archives
        .push(tarball("b72ed53263f07c843ce34513a9d62128051e2fc3", 374759));
    let diff = PackageDiff::new(old, new);

    let out = PortfileRewriter::new(&diff, &Frontend::Pypi)
        .archive_format(Frontend::Pypi.archive_format())
        .rewrite(old_portfile);
    assert_eq!(out, expected);
}

#[test]
fn test_update_sunpy() {
    // Upgrading sunpy from 0.3.1 to 1.1.3 resets the revision, extends a
    // long runtime block and adds test dependencies the Portfile never had.
    let old_portfile = r#"version     0.3.1
revision    1

if {${name} ne ${subport}} {

    depends_build-append  port:py${python.version}-numpy

    depends_lib-append    port:py${python.version}-scipy \
                          port:py${python.version}-matplotlib \
                          port:py${python.version}-astropy \
                          port:py${python.version}-pyqt4 \
                          port:py${python.version}-suds \
                          port:py${python.version}-pandas \
                          port:py${python.version}-beautifulsoup4 \
                          port:py${python.version}-configobj \
                          port:py${python.version}-setuptools \
                          port:py${python.version}-py
}
"#;
    let expected = r#"version     1.1.3
revision    0

if {${name} ne ${subport}} {

    depends_build-append  port:py${python.version}-numpy

    depends_lib-append    port:py${python.version}-scipy \
                          port:py${python.version}-matplotlib \
                          port:py${python.version}-astropy \
                          port:py${python.version}-pyqt4 \
                          port:py${python.version}-suds \
                          port:py${python.version}-pandas \
                          port:py${python.version}-beautifulsoup4 \
                          port:py${python.version}-configobj \
                          port:py${python.version}-setuptools \
                          port:py${python.version}-py \
                          port:py${python.version}-numpy \
                          port:py${python.version}-parfive
}
#TODO: Move this
depends_test-append port:py${python.version}-hypothesis \
                    port:py${python.version}-pytest \
                    port:py${python.version}-pytest-doctestplus \
                    port:py${python.version}-pytest-astropy \
                    port:py${python.version}-pytest-cov \
                    port:py${python.version}-pytest-mock \
                    port:py${python.version}-tox \
                    port:py${python.version}-tox-conda
"#;
    let old = package("sunpy", "0.3.1", &[]);
    let new = package(
        "sunpy",
        "1.1.3",
        &[
            (Phase::Run, &["numpy", "parfive"]),
            (
                Phase::Test,
                &[
                    "hypothesis",
                    "pytest",
                    "pytest-doctestplus",
                    "pytest-astropy",
                    "pytest-cov",
                    "pytest-mock",
                    "tox",
                    "tox-conda",
                ],
            ),
        ],
    );
    let diff = PackageDiff::new(old, new);

    assert_eq!(rewrite(old_portfile, &diff, &Frontend::Pypi), expected);
}

#[test]
fn test_update_gwosc() {
    // The runtime block must disappear entirely; the test block is new.
    let old_portfile = r#"version 0.3.3

if {${name} ne ${subport}} {
    depends_build-append port:py${python.version}-setuptools
    depends_lib-append   port:py${python.version}-six
    livecheck.type      none
} else {
"#;
    let expected = r#"version 0.5.3

if {${name} ne ${subport}} {
    depends_build-append port:py${python.version}-setuptools
    livecheck.type      none
} else {
#TODO: Move this
depends_test-append port:py${python.version}-pytest \
                    port:py${python.version}-pytest-cov \
                    port:py${python.version}-pytest-socket
"#;
    let old = package("gwosc", "0.3.3", &[(Phase::Run, &["six"])]);
    let new = package(
        "gwosc",
        "0.5.3",
        &[
            (Phase::Run, &[]),
            (Phase::Test, &["pytest", "pytest-cov", "pytest-socket"]),
        ],
    );
    let diff = PackageDiff::new(old, new);

    assert_eq!(rewrite(old_portfile, &diff, &Frontend::Pypi), expected);
}

#[test]
fn test_unchanged_diff_is_byte_identical() {
    let portfile = r#"# -*- coding: utf-8; mode: tcl; tab-width: 4; indent-tabs-mode: nil -*-

PortSystem          1.0
PortGroup           python 1.0

name                py-requests
version             2.25.1
revision            0
platforms           darwin
license             Apache-2

checksums           rmd160  91bf89c0493ad2caa8ed29372972e2e887f84bb8 \
                    sha256  2e50876bcdd74517e7b71f3e7a76102050edec255b3983403f1a63e7c8a41e7a \
                    size    42

if {${name} ne ${subport}} {
    depends_build-append \
                    port:py${python.version}-setuptools

    depends_lib-append  port:py${python.version}-certifi \
                        port:py${python.version}-chardet \
                        port:py${python.version}-idna

    depends_test-append port:py${python.version}-pytest
    livecheck.type      none
}
"#;
    let mut pkg = package(
        "requests",
        "2.25.1",
        &[(Phase::Run, &["certifi", "chardet", "idna"])],
    );
    pkg.archives.push(
        Archive::new("url")
            .with_size(42)
            .with_checksum("rmd160", "91bf89c0493ad2caa8ed29372972e2e887f84bb8")
            .with_checksum(
                "sha256",
                "2e50876bcdd74517e7b71f3e7a76102050edec255b3983403f1a63e7c8a41e7a",
            ),
    );
    let diff = PackageDiff::new(pkg.clone(), pkg);

    assert_eq!(rewrite(portfile, &diff, &Frontend::Pypi), portfile);
}

#[test]
fn test_remove_first_entry_of_block() {
    let diff = PackageDiff::new(
        package("foo", "1.0", &[(Phase::Run, &["foo", "bar"])]),
        package("foo", "1.0", &[(Phase::Run, &["bar"])]),
    );
    let portfile = "depends_lib-append port:foo \\\n    port:bar\n";
    assert_eq!(
        rewrite(portfile, &diff, &identity),
        "depends_lib-append port:bar\n"
    );
}

#[test]
fn test_multiline_block_keeps_learned_indent() {
    let diff = PackageDiff::new(
        package("foo", "1.0", &[(Phase::Build, &["a", "b"])]),
        package("foo", "1.0", &[(Phase::Build, &["b", "c"])]),
    );
    let portfile = "\tdepends_build-append \\\n\t\t\tport:a \\\n\t\t\tport:b\n";
    assert_eq!(
        rewrite(portfile, &diff, &identity),
        "\tdepends_build-append \\\n\t\t\tport:b \\\n\t\t\tport:c\n"
    );
}

#[test]
fn test_emptied_block_with_leading_continuation_disappears() {
    let diff = PackageDiff::new(
        package("foo", "1.0", &[(Phase::Build, &["a", "b"])]),
        package("foo", "1.0", &[]),
    );
    let portfile = "before\ndepends_build-append \\\n    port:a \\\n    port:b\nafter\n";
    assert_eq!(rewrite(portfile, &diff, &identity), "before\nafter\n");
}

#[test]
fn test_version_in_comment_untouched() {
    let diff = version_bump("foo", "1.2.3", "1.2.4");
    let portfile = "\
# 1.2.3 needs a patch, see below
version             1.2.3
patchfiles          fix-1.2.3.diff
";
    assert_eq!(
        rewrite(portfile, &diff, &identity),
        "\
# 1.2.3 needs a patch, see below
version             1.2.4
patchfiles          fix-1.2.3.diff
"
    );
}

#[test]
fn test_checksum_continuation_untouched() {
    let old_rmd = "91bf89c0493ad2caa8ed29372972e2e887f84bb8";
    let new_rmd = "770c41f726e57b64e2c27266e6b0cf8b7bf895ab";
    let sha = "2e50876bcdd74517e7b71f3e7a76102050edec255b3983403f1a63e7c8a41e7a";

    let mut old = package("foo", "1.0", &[]);
    old.archives.push(
        Archive::new("url")
            .with_size(42)
            .with_checksum("rmd160", old_rmd)
            .with_checksum("sha256", sha),
    );
    let mut new = package("foo", "1.0", &[]);
    new.archives.push(
        Archive::new("url")
            .with_size(42)
            .with_checksum("rmd160", new_rmd)
            .with_checksum("sha256", sha),
    );
    let diff = PackageDiff::new(old, new);

    let portfile = format!(
        "checksums rmd160 {} \\\n          sha256 {} \\\n          size 42\n",
        old_rmd, sha
    );
    assert_eq!(
        rewrite(&portfile, &diff, &identity),
        format!(
            "checksums rmd160 {} \\\n          sha256 {} \\\n          size 42\n",
            new_rmd, sha
        )
    );
}

#[test]
fn test_update_perl_port() {
    let old_portfile = r#"PortSystem          1.0
PortGroup           perl5 1.0

perl5.branches      5.28 5.30 5.32
perl5.setup         Foo-Bar 0.12
revision            2

checksums           rmd160  91bf89c0493ad2caa8ed29372972e2e887f84bb8 \
                    size    42

if {${perl5.major} != ""} {
    depends_lib-append \
                    port:p${perl5.major}-try-tiny \
                    port:p${perl5.major}-moo
}
"#;
    let expected = r#"PortSystem          1.0
PortGroup           perl5 1.0

perl5.branches      5.28 5.30 5.32
perl5.setup         Foo-Bar 0.13
revision            0

checksums           rmd160  770c41f726e57b64e2c27266e6b0cf8b7bf895ab \
                    size    1337

if {${perl5.major} != ""} {
    depends_lib-append \
                    port:p${perl5.major}-moo \
                    port:p${perl5.major}-type-tiny
}
"#;
    let mut old = package("Foo::Bar", "0.12", &[(Phase::Run, &["Try::Tiny", "Moo"])]);
    old.archives
        .push(tarball("91bf89c0493ad2caa8ed29372972e2e887f84bb8", 42));
    let mut new = package("Foo::Bar", "0.13", &[(Phase::Run, &["Moo", "Type::Tiny"])]);
    new.archives
        .push(tarball("770c41f726e57b64e2c27266e6b0cf8b7bf895ab", 1337));
    let diff = PackageDiff::new(old, new);

    let out = PortfileRewriter::new(&diff, &Frontend::Cpan)
        .archive_format(Frontend::Cpan.archive_format())
        .rewrite(old_portfile);
    assert_eq!(out, expected);
}

#[test]
fn test_update_ruby_port_uses_gem_archive() {
    let old_portfile = r#"ruby.setup          rack 2.2.3 gem {} rubygems
checksums           rmd160  91bf89c0493ad2caa8ed29372972e2e887f84bb8
depends_run-append  port:rb${ruby.suffix}-foo
"#;
    let expected = r#"ruby.setup          rack 2.2.4 gem {} rubygems
checksums           rmd160  770c41f726e57b64e2c27266e6b0cf8b7bf895ab
depends_run-append  port:rb${ruby.suffix}-foo
"#;
    let gem = |digest: &str| Archive {
        format: ArchiveFormat::RubyGem,
        ..Archive::new("https://rubygems.org/gems/rack.gem").with_checksum("rmd160", digest)
    };

    let mut old = package("rack", "2.2.3", &[]);
    old.archives
        .push(tarball("91bf89c0493ad2caa8ed29372972e2e887f84bb8", 1));
    old.archives
        .push(gem("91bf89c0493ad2caa8ed29372972e2e887f84bb8"));
    let mut new = package("rack", "2.2.4", &[]);
    new.archives
        .push(tarball("2f52bbb095baa858b3273d851de5cc25a4470351", 2));
    new.archives
        .push(gem("770c41f726e57b64e2c27266e6b0cf8b7bf895ab"));
    let diff = PackageDiff::new(old, new);

    let out = PortfileRewriter::new(&diff, &Frontend::Rubygems)
        .archive_format(Frontend::Rubygems.archive_format())
        .rewrite(old_portfile);
    assert_eq!(out, expected);
}
