//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use chrono::Utc;
use facet_config::Config;
use facet_index::{CatalogFile, CatalogIndex, StaticCatalog};
use facet_nav::{NavigationCompiler, NavigationContext};
use tracing::info;

use super::args::NavigationArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

/// A catalogue loaded and wired to a navigation compiler.
pub struct Session {
    /// Product and SKU indexes.
    pub index: Arc<CatalogIndex>,
    /// Compiler using the catalogue as metadata source and count oracle.
    pub compiler: NavigationCompiler,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads the catalogue named by the request and builds its indexes.
    pub fn session(&self, catalog: &Path) -> Result<Session, ExitCode> {
        let path = self.cwd.join(catalog);
        let file = CatalogFile::load(&path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        let index = CatalogIndex::build(&file, &self.config.index.stemmer).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        info!(
            catalog = %path.display(),
            products = index.products().num_docs(),
            skus = index.skus().num_docs(),
            "catalog indexed"
        );

        let index = Arc::new(index);
        let meta = Arc::new(StaticCatalog::new(
            &file,
            self.config.navigation.new_arrival_days,
            Utc::now().date_naive(),
        ));
        let compiler =
            NavigationCompiler::from_config(&self.config, meta.clone(), meta, index.clone());
        Ok(Session { index, compiler })
    }
}

impl Session {
    /// Compiles the request described by the navigation flags.
    pub fn compile(&self, args: &NavigationArgs) -> Result<NavigationContext, ExitCode> {
        self.compiler
            .compile_navigation(
                args.scope(),
                &args.categories,
                args.subcategories,
                &args.filter_map(),
            )
            .map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            })
    }
}

/// Resolves the current working directory or prints an error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration for the current directory or prints an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
