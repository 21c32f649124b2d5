//! Build, push and latest-rc tagging of the slim and full images.

use crate::cli::RuntimeConfig;
use crate::cli::docker::{CommandRunner, ImageRef, Variant};
use crate::error::Result;
use crate::metadata::{ReleaseVersion, resolve_version};
use crate::source::DownloadResolver;

/// What a publish run did.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub version: ReleaseVersion,
    pub download_url: String,
    pub built: Vec<ImageRef>,
    pub pushed: Vec<ImageRef>,
    /// latest-rc aliases that were tagged and pushed
    pub aliased: Vec<ImageRef>,
}

/// Builds both image variants and publishes them.
///
/// This function:
/// 1. Checks that docker is usable
/// 2. Resolves the version from the override or package.json
/// 3. Resolves the tarball download URL for that version
/// 4. Builds the slim then the full image without layer cache
/// 5. Unless `no_publish` is set, pushes both version tags
/// 6. For a package.json version only, moves and pushes `latest-rc-<variant>`
///
/// The first failure ends the run. Images already pushed stay pushed.
pub async fn publish_images<R: CommandRunner>(
    config: &RuntimeConfig,
    resolver: &DownloadResolver,
    runner: &R,
) -> Result<PublishReport> {
    runner.ensure_available().await?;

    let version = resolve_version(config.version_override.as_deref(), &config.package_json)?;
    config.progress(&format!("Using Salesforce CLI Version {}", version));

    let download_url = resolver.resolve(&version.value).await?;
    config.verbose_println(&format!("Download URL: {}", download_url));

    let mut report = PublishReport {
        version,
        download_url,
        built: Vec::new(),
        pushed: Vec::new(),
        aliased: Vec::new(),
    };
    let repository = config.repository.as_str();
    let version = report.version.value.clone();

    config.section("Building images");
    for variant in Variant::ALL {
        let image = ImageRef::versioned(repository, &version, variant);
        config.progress(&format!("Building {}", image));
        runner
            .build(variant, &variant.build_arg(&version, &report.download_url), &image)
            .await?;
        config.success(&format!("Built {}", image));
        report.built.push(image);
    }

    if config.no_publish {
        log::info!("NO_PUBLISH is set, skipping push");
        config.warn("Publishing disabled, images were only built locally");
        return Ok(report);
    }

    config.section("Pushing images");
    for image in &report.built {
        config.progress(&format!("Pushing {}", image));
        runner.push(image).await?;
        report.pushed.push(image.clone());
    }

    if report.version.is_override() {
        log::info!("Version {} was supplied explicitly, not tagging latest-rc", version);
        return Ok(report);
    }

    config.section("Tagging latest-rc");
    for variant in Variant::ALL {
        let source = ImageRef::versioned(repository, &version, variant);
        let alias = ImageRef::latest_rc(repository, variant);
        config.progress(&format!("Tagging {} as {}", source, alias));
        runner.tag(&source, &alias).await?;
        runner.push(&alias).await?;
        report.aliased.push(alias);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use crate::cli::docker::recording::RecordingRunner;
    use crate::error::{CliError, PublishError};
    use std::fs;
    use tempfile::TempDir;
    use url::Url;

    const VERSIONS_PATH: &str = "/versions.json";
    const MANIFEST_PATH: &str = "/buildmanifest";
    const DOWNLOAD_URL: &str = "https://example.com/sfdx-linux-x64-7.100.0.tar.xz";

    struct Fixture {
        server: mockito::ServerGuard,
        workdir: TempDir,
    }

    impl Fixture {
        async fn new() -> Self {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("GET", VERSIONS_PATH)
                .with_status(200)
                .with_body(format!(r#"{{ "7.100.0": "{}" }}"#, DOWNLOAD_URL))
                .create_async()
                .await;
            server
                .mock("GET", MANIFEST_PATH)
                .with_status(200)
                .with_body(r#"{ "version": "7.101.0", "xz": "https://example.com/rc.tar.xz" }"#)
                .create_async()
                .await;

            let workdir = TempDir::new().unwrap();
            fs::write(
                workdir.path().join("package.json"),
                r#"{ "name": "sfdx-cli", "version": "7.100.0" }"#,
            )
            .unwrap();

            Self { server, workdir }
        }

        /// Default-flow configuration; nothing is read from the environment.
        fn config(&self) -> RuntimeConfig {
            let mut config = RuntimeConfig::new(
                "salesforce/salesforcedx",
                Url::parse(&format!("{}{}", self.server.url(), VERSIONS_PATH)).unwrap(),
                Url::parse(&format!("{}{}", self.server.url(), MANIFEST_PATH)).unwrap(),
                OutputManager::new(false, true),
            );
            config.package_json = self.workdir.path().join("package.json");
            config
        }

        fn resolver(&self, config: &RuntimeConfig) -> DownloadResolver {
            DownloadResolver::new(config.versions_url.clone(), config.manifest_url.clone())
        }
    }

    #[tokio::test]
    async fn test_default_flow_builds_pushes_and_tags_latest_rc() {
        let fixture = Fixture::new().await;
        let config = fixture.config();
        let runner = RecordingRunner::new();

        let report = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec![
                format!(
                    "build --file ./dockerfiles/Dockerfile_slim --build-arg DOWNLOAD_URL={} \
                     --tag salesforce/salesforcedx:7.100.0-slim --no-cache .",
                    DOWNLOAD_URL
                ),
                "build --file ./dockerfiles/Dockerfile_full --build-arg SALESFORCE_CLI_VERSION=7.100.0 \
                 --tag salesforce/salesforcedx:7.100.0-full --no-cache ."
                    .to_string(),
                "push salesforce/salesforcedx:7.100.0-slim".to_string(),
                "push salesforce/salesforcedx:7.100.0-full".to_string(),
                "tag salesforce/salesforcedx:7.100.0-slim salesforce/salesforcedx:latest-rc-slim"
                    .to_string(),
                "push salesforce/salesforcedx:latest-rc-slim".to_string(),
                "tag salesforce/salesforcedx:7.100.0-full salesforce/salesforcedx:latest-rc-full"
                    .to_string(),
                "push salesforce/salesforcedx:latest-rc-full".to_string(),
            ]
        );
        assert_eq!(report.download_url, DOWNLOAD_URL);
        assert_eq!(report.aliased.len(), 2);
    }

    #[tokio::test]
    async fn test_no_publish_only_builds() {
        let fixture = Fixture::new().await;
        let mut config = fixture.config();
        config.no_publish = true;
        let runner = RecordingRunner::new();

        let report = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|args| args[0] == "build"));
        assert!(report.pushed.is_empty());
        assert!(report.aliased.is_empty());
    }

    #[tokio::test]
    async fn test_override_pushes_without_latest_rc() {
        let fixture = Fixture::new().await;
        let mut config = fixture.config();
        config.version_override = Some("7.101.0".to_string());
        let runner = RecordingRunner::new();

        let report = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap();

        assert_eq!(report.download_url, "https://example.com/rc.tar.xz");
        assert_eq!(
            runner.command_lines()[2..],
            [
                "push salesforce/salesforcedx:7.101.0-slim".to_string(),
                "push salesforce/salesforcedx:7.101.0-full".to_string(),
            ]
        );
        assert!(runner.calls().iter().all(|args| args[0] != "tag"));
        assert!(report.aliased.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_version_builds_nothing() {
        let fixture = Fixture::new().await;
        let mut config = fixture.config();
        config.version_override = Some("1.0.0".to_string());
        let runner = RecordingRunner::new();

        let err = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::VersionNotFound { .. }));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_docker_aborts_before_lookup() {
        let fixture = Fixture::new().await;
        let config = fixture.config();
        let runner = RecordingRunner::unavailable();

        let err = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap_err();

        assert!(matches!(err, PublishError::MissingEnvironment { .. }));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_push_stops_the_run() {
        let fixture = Fixture::new().await;
        let config = fixture.config();
        let runner = RecordingRunner::failing_on("push");

        let err = publish_images(&config, &fixture.resolver(&config), &runner)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PublishError::Cli(CliError::ExecutionFailed { ref command, .. })
                if command == "docker push salesforce/salesforcedx:7.100.0-slim"
        ));
        // two builds and the one failed push
        assert_eq!(runner.calls().len(), 3);
    }
}
