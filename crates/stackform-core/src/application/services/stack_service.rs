//! Stack Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Validate the document (references, required properties)
//! 2. Render it through the configured renderer
//! 3. Write the artifact through the filesystem port
//!
//! Nothing is written unless every earlier step succeeded.

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, TemplateRenderer},
    domain::{DomainValidator as validator, Section, Template},
    error::{StackformError, StackformResult},
};

/// Main generation service.
pub struct StackService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl StackService {
    /// Create a new stack service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use stackform_core::application::{StackService, ports::*};
    ///
    /// let service = StackService::new(
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Validate and render a document into its textual artifact.
    ///
    /// Deterministic: the same declaration sequence always renders to the
    /// same text.
    #[instrument(skip_all, fields(format = self.renderer.format()))]
    pub fn render(&self, template: &Template) -> StackformResult<String> {
        debug!(
            parameters = template.len(Section::Parameters),
            resources = template.len(Section::Resources),
            outputs = template.len(Section::Outputs),
            "Validating template"
        );
        validator::validate_template(template).map_err(StackformError::Domain)?;

        let artifact = self.renderer.render(template)?;
        info!(bytes = artifact.len(), "Template rendered");
        Ok(artifact)
    }

    /// Write a rendered artifact, creating the parent directory if needed.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write(&self, artifact: &str, path: &Path) -> StackformResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.filesystem.exists(parent) {
                debug!(parent = %parent.display(), "Creating output directory");
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem.write_file(path, artifact)?;
        info!("Artifact written");
        Ok(())
    }

    /// Render then write. Returns the artifact so callers can echo it.
    pub fn publish(&self, template: &Template, path: &Path) -> StackformResult<String> {
        let artifact = self.render(template)?;
        self.write(&artifact, path)?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::output::{MockFilesystem, MockTemplateRenderer},
    };
    use crate::domain::{DomainError, Resource, ResourceKind, Value};
    use std::path::PathBuf;

    fn valid_template() -> Template {
        let mut t = Template::new();
        t.declare_resource(Resource::new("VPC", ResourceKind::Vpc))
            .unwrap();
        t
    }

    fn fixed_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_format().return_const("yaml");
        renderer
            .expect_render()
            .returning(|_| Ok("Resources: {}\n".to_string()));
        renderer
    }

    #[test]
    fn invalid_template_is_never_rendered_or_written() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_format().return_const("yaml");
        renderer.expect_render().never();

        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        fs.expect_exists().never();

        let mut t = valid_template();
        t.declare_resource(
            Resource::new("Attach", ResourceKind::VpcGatewayAttachment)
                .property("VpcId", Value::reference("Missing")),
        )
        .unwrap();

        let service = StackService::new(Box::new(renderer), Box::new(fs));
        let err = service
            .publish(&t, Path::new("vpc_new.yaml"))
            .unwrap_err();

        assert!(matches!(
            err,
            StackformError::Domain(DomainError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn renderer_failure_writes_nothing() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_format().return_const("json");
        renderer.expect_render().returning(|_| {
            Err(ApplicationError::RenderingFailed {
                format: "json",
                reason: "boom".into(),
            }
            .into())
        });

        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let service = StackService::new(Box::new(renderer), Box::new(fs));
        assert!(
            service
                .publish(&valid_template(), Path::new("out.json"))
                .is_err()
        );
    }

    #[test]
    fn publish_writes_rendered_artifact_once() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file()
            .withf(|path, content| path == Path::new("vpc_new.yaml") && content == "Resources: {}\n")
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_create_dir_all().never();

        let service = StackService::new(Box::new(fixed_renderer()), Box::new(fs));
        let artifact = service
            .publish(&valid_template(), Path::new("vpc_new.yaml"))
            .unwrap();
        assert_eq!(artifact, "Resources: {}\n");
    }

    #[test]
    fn missing_parent_directory_is_created() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new("out/stacks"))
            .return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("out/stacks"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let service = StackService::new(Box::new(fixed_renderer()), Box::new(fs));
        service
            .write("x", &PathBuf::from("out/stacks/vpc.yaml"))
            .unwrap();
    }

    #[test]
    fn write_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let service = StackService::new(Box::new(fixed_renderer()), Box::new(fs));
        let err = service
            .publish(&valid_template(), Path::new("vpc_new.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            StackformError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
