//! Binary-local application orchestration.
//!
//! `main.rs` keeps logging and argument wiring; this module selects the
//! version and environment sources, renders the record and writes it out.

mod output;

use std::path::PathBuf;

use buildinfo::command::CommandRunner;
use buildinfo::error::{AppError, SourceError};
use buildinfo::render::JsonRenderer;
use buildinfo::source::{
    absolute_dir, resolve_environment_source, resolve_version_source, FileSource, GitSource,
    MockSource, OsSource, RpmSpecSource, VersionSource,
};
use buildinfo::BuildInfo;

use crate::cli::Args;
pub(crate) use output::OutputTarget;

/// Version source requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ParserSelector {
    /// Detect file, rpmspec, then git.
    Auto,
    File,
    Git,
    #[value(name = "rpmspec")]
    RpmSpec,
    Mock,
}

/// One `buildinfo` invocation.
#[derive(Debug, Clone)]
pub(crate) struct Application {
    pub project_dir: PathBuf,
    pub parser: ParserSelector,
    pub git_exe: Option<String>,
    pub mock_version: String,
    pub mock_revision: String,
    pub mock_branch: String,
    pub output: OutputTarget,
    pub renderer: JsonRenderer,
}

impl From<&Args> for Application {
    fn from(args: &Args) -> Self {
        Self {
            project_dir: args.project_dir.clone(),
            parser: args.parser,
            git_exe: args.git_exe.clone(),
            mock_version: args.mock_version.clone(),
            mock_revision: args.mock_revision.clone(),
            mock_branch: args.mock_branch.clone(),
            output: OutputTarget::from_filename(args.filename.as_deref()),
            renderer: JsonRenderer::new(args.indent),
        }
    }
}

impl Application {
    /// Resolve, render and write the build record.
    pub(crate) fn run(&self, runner: &dyn CommandRunner) -> Result<(), AppError> {
        tracing::debug!(input = %self.project_dir.display(), "parsing build information");
        let info = self.build_info(runner, resolve_environment_source)?;
        let data = self.renderer.render(&info)?;

        tracing::info!(output = %self.output, "writing build information");
        self.output.write(&data)
    }

    /// Version information is resolved and parsed before the environment
    /// source is consulted.
    pub(crate) fn build_info<FEnv>(
        &self,
        runner: &dyn CommandRunner,
        environment_source: FEnv,
    ) -> Result<BuildInfo, AppError>
    where
        FEnv: FnOnce() -> Result<OsSource, SourceError>,
    {
        let source = self.version_source(runner)?;
        tracing::info!(parser = %source.kind(), source = %source, "parsing version information");
        let version_info = source.parse_version_info(runner)?;

        let environment = environment_source()?;
        tracing::info!(source = %environment, "parsing environment information");
        let environment_info = environment.parse_environment_info()?;

        Ok(BuildInfo::new(version_info, environment_info))
    }

    fn version_source(&self, runner: &dyn CommandRunner) -> Result<VersionSource, SourceError> {
        let dir = || absolute_dir(&self.project_dir);
        Ok(match self.parser {
            ParserSelector::Auto => return resolve_version_source(&self.project_dir, runner),
            ParserSelector::File => FileSource::probe(&dir()?)?.into(),
            ParserSelector::Git => match &self.git_exe {
                Some(exe) => GitSource::probe(exe, &dir()?, runner)?.into(),
                None => GitSource::probe_system(&dir()?, runner)?.into(),
            },
            ParserSelector::RpmSpec => RpmSpecSource::probe_system(&dir()?, runner)?.into(),
            ParserSelector::Mock => MockSource::from_values(
                &self.mock_version,
                &self.mock_revision,
                &self.mock_branch,
            )
            .into(),
        })
    }
}
