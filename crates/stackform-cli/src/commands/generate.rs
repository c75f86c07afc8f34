//! The generate command: the whole of a bare `stackform` run.
//!
//! Responsibility: resolve settings, build the blueprint, and hand it to
//! the core stack service. No template logic lives here.

use tracing::{debug, instrument};

use stackform_adapters::{
    IntrinsicStyle, JsonRenderer, LocalFilesystem, YamlRenderer, blueprints::public_vpc,
};
use stackform_core::{
    application::{StackService, ports::TemplateRenderer},
    error::StackformError,
};

use crate::{
    cli::{ArtifactFormat, GenerateArgs},
    config::{AppConfig, OutputConfig},
    error::CliResult,
    output::OutputManager,
};

/// Execute the generate command.
///
/// 1. Merge CLI flags over the loaded configuration
/// 2. Declare the public VPC blueprint
/// 3. Validate and render (nothing is written if either fails)
/// 4. Write the artifact, unless `--dry-run`
/// 5. Echo the artifact on stdout
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = config.merge_args(&args).output;
    debug!(
        path = %settings.path.display(),
        format = %settings.format,
        long_form = settings.long_form,
        echo = settings.echo,
        "Settings resolved"
    );

    let template = public_vpc::public_vpc().map_err(StackformError::Domain)?;
    let service = StackService::new(renderer_for(&settings), Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let artifact = service.render(&template)?;
        output.artifact(&artifact)?;
        output.info(&format!("Dry run: {} not written", settings.path.display()))?;
        return Ok(());
    }

    let artifact = service.publish(&template, &settings.path)?;
    if settings.echo {
        output.artifact(&artifact)?;
    }
    output.success(&format!("Wrote {}", settings.path.display()))?;
    Ok(())
}

fn renderer_for(settings: &OutputConfig) -> Box<dyn TemplateRenderer> {
    match settings.format {
        ArtifactFormat::Json => Box::new(JsonRenderer::new()),
        ArtifactFormat::Yaml if settings.long_form => {
            Box::new(YamlRenderer::with_style(IntrinsicStyle::Long))
        }
        ArtifactFormat::Yaml => Box::new(YamlRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(format: ArtifactFormat, long_form: bool) -> OutputConfig {
        OutputConfig {
            format,
            long_form,
            ..AppConfig::default().output
        }
    }

    #[test]
    fn renderer_follows_format() {
        assert_eq!(renderer_for(&settings(ArtifactFormat::Yaml, false)).format(), "yaml");
        assert_eq!(renderer_for(&settings(ArtifactFormat::Json, false)).format(), "json");
    }

    #[test]
    fn long_form_yaml_writes_mappings() {
        let renderer = renderer_for(&settings(ArtifactFormat::Yaml, true));
        let text = renderer.render(&public_vpc::public_vpc().unwrap()).unwrap();
        assert!(text.contains("Ref: VPC"));
        assert!(!text.contains("!Ref"));
    }
}
