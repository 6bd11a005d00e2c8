//! Link generation scenarios through the library API.

use crate::common::{TestBuild, example_settings};
use javadoc_links::core::LinksError;
use javadoc_links::links::LinkSettings;
use javadoc_links::model::{ArtifactViews, DependencyId, ResolvedArtifact};
use javadoc_links::rules::{LinkOverride, OverrideRule};
use javadoc_links::test_utils::{FakeTransport, write_javadoc_jar};

fn foo() -> DependencyId {
    DependencyId::new("com.example", "foo", "1.0")
}

#[tokio::test]
async fn test_plain_dependency_links_to_default_host() {
    let build = TestBuild::new(FakeTransport::new());
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(build.file("foo-1.0.jar"), foo())],
        ..ArtifactViews::default()
    };

    build.builder(example_settings()).build(&views, &build.output()).await.unwrap();

    assert_eq!(build.links(), "-link https://docs.example.com/com.example/foo/1.0");
}

#[tokio::test]
async fn test_javadoc_artifact_links_offline() {
    let build = TestBuild::new(FakeTransport::new());
    let jar = build.file("foo-1.0-javadoc.jar");
    write_javadoc_jar(&jar, "com.example.foo");
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(build.file("foo-1.0.jar"), foo())],
        javadoc: vec![ResolvedArtifact::external(&jar, foo())],
        ..ArtifactViews::default()
    };

    build.builder(example_settings()).build(&views, &build.output()).await.unwrap();

    let unpacked = std::path::absolute(build.output().unpack_dir.join("com.example_foo_1.0")).unwrap();
    assert_eq!(
        build.links(),
        format!("-linkoffline https://docs.example.com/com.example/foo/1.0 {}", unpacked.display())
    );
    assert_eq!(
        std::fs::read_to_string(unpacked.join("element-list")).unwrap(),
        "com.example.foo\n"
    );
    assert!(unpacked.join("com/example/foo/package-summary.html").is_file());
}

#[tokio::test]
async fn test_paper_api_uses_release_line() {
    let build = TestBuild::new(FakeTransport::new());
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(
            build.file("paper-api.jar"),
            DependencyId::new("io.papermc.paper", "paper-api", "1.20.4"),
        )],
        ..ArtifactViews::default()
    };

    build.builder(example_settings()).build(&views, &build.output()).await.unwrap();

    assert_eq!(build.links(), "-link https://jd.papermc.io/paper/1.20/");
}

#[tokio::test]
async fn test_snapshot_dependency_is_skipped() {
    let build = TestBuild::new(FakeTransport::new());
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(
            build.file("foo-1.1-SNAPSHOT.jar"),
            DependencyId::new("com.example", "foo", "1.1-SNAPSHOT")
                .with_snapshot_version("1.1-20240101.101010-3"),
        )],
        ..ArtifactViews::default()
    };

    let summary = build.builder(example_settings()).build(&views, &build.output()).await.unwrap();

    assert_eq!(build.links(), "");
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_forbidden_host_fails_with_both_probes() {
    let build = TestBuild::new(FakeTransport::new().with_default_status(403));
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(build.file("foo-1.0.jar"), foo())],
        ..ArtifactViews::default()
    };
    let settings = LinkSettings {
        check_availability: true,
        ..example_settings()
    };

    let err = build.builder(settings).build(&views, &build.output()).await.unwrap_err();

    let Some(LinksError::AvailabilityCheckFailed { report, .. }) = err.downcast_ref::<LinksError>() else {
        panic!("unexpected error: {err:#}");
    };
    let rendered = report.to_string();
    assert!(rendered.contains(
        "Got 403 response code from https://docs.example.com/com.example/foo/1.0/element-list"
    ));
    assert!(rendered.contains(
        "Got 403 response code from https://docs.example.com/com.example/foo/1.0/package-list"
    ));
    // no priming for hosts other than javadoc.io
    assert_eq!(build.transport.total_calls(), 2);
    assert!(!build.output().links_file.exists());
}

#[tokio::test]
async fn test_javadoc_io_is_primed_before_linking() {
    let base = "https://javadoc.io/doc/com.example/foo/1.0/";
    let build = TestBuild::new(
        FakeTransport::new()
            .with_sequence(format!("{base}element-list"), [403, 403, 200])
            .with_status(format!("{base}package-list"), 403)
            .with_status("https://javadoc.io/static/com.example/foo/1.0/", 200),
    );
    let views = ArtifactViews {
        api: vec![ResolvedArtifact::external(build.file("foo-1.0.jar"), foo())],
        ..ArtifactViews::default()
    };
    let settings = LinkSettings {
        check_availability: true,
        ..LinkSettings::default()
    };

    build.builder(settings).build(&views, &build.output()).await.unwrap();

    assert_eq!(build.links(), "-link https://javadoc.io/doc/com.example/foo/1.0");
    assert_eq!(build.transport.call_count("https://javadoc.io/static/com.example/foo/1.0/"), 2);
}

#[tokio::test]
async fn test_shuffled_inputs_produce_identical_files() {
    let build = TestBuild::new(FakeTransport::new());
    let jar = build.file("kyori-javadoc.jar");
    write_javadoc_jar(&jar, "net.kyori.adventure.text");
    let kyori = DependencyId::new("net.kyori", "adventure-api", "4.17.0");
    let api = vec![
        ResolvedArtifact::external(build.file("foo.jar"), foo()),
        ResolvedArtifact::external(build.file("adventure-api.jar"), kyori.clone()),
        ResolvedArtifact::external(
            build.file("log4j-api.jar"),
            DependencyId::new("org.apache.logging.log4j", "log4j-api", "2.23.1"),
        ),
        ResolvedArtifact::local(build.file("build/classes/java/main")),
    ];
    let sources = vec![
        ResolvedArtifact::local(build.file("src/main/java")),
        ResolvedArtifact::external(build.file("foo-sources.jar"), foo()),
    ];
    let builder = build.builder(example_settings());

    let forward = ArtifactViews {
        api: api.clone(),
        javadoc: vec![ResolvedArtifact::external(&jar, kyori)],
        sources: sources.clone(),
    };
    builder.build(&forward, &build.output()).await.unwrap();
    let first = build.links();

    let backward = ArtifactViews {
        api: api.into_iter().rev().collect(),
        javadoc: forward.javadoc.clone(),
        sources: sources.into_iter().rev().collect(),
    };
    builder.build(&backward, &build.output()).await.unwrap();

    assert_eq!(first, build.links());
    assert_eq!(first.lines().count(), 5);
    assert!(first.contains("-link https://logging.apache.org/log4j/2.x/javadoc/log4j-api/"));
    assert!(first.contains("-linkoffline https://jd.advntr.dev/api/4.17.0 "));
}

#[tokio::test]
async fn test_user_override_after_builtin_rules() {
    let build = TestBuild::new(FakeTransport::new());
    let mut settings = example_settings();
    settings.rules.push(OverrideRule::for_prefix(
        "com.example:",
        LinkOverride::Simple {
            template: "https://internal.example.com/{name}/{version}/".to_string(),
        },
    ));
    // built-in rules keep precedence for their own coordinates
    settings.rules.override_dependency("net.kyori:adventure-api", "https://never.example.com/");
    let views = ArtifactViews {
        api: vec![
            ResolvedArtifact::external(build.file("foo.jar"), foo()),
            ResolvedArtifact::external(
                build.file("adventure-api.jar"),
                DependencyId::new("net.kyori", "adventure-api", "4.17.0"),
            ),
        ],
        ..ArtifactViews::default()
    };

    build.builder(settings).build(&views, &build.output()).await.unwrap();

    assert_eq!(
        build.links(),
        "-link https://internal.example.com/foo/1.0/\n-link https://jd.advntr.dev/api/4.17.0"
    );
}
