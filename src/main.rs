use anyhow::Context;
use clap::Parser;
use curriculum_map::core::export::{self, ExportFormat};
use curriculum_map::utils::error::ErrorSeverity;
use curriculum_map::utils::{logger, validation::Validate};
use curriculum_map::{
    CliConfig, Command, CurriculumBuilder, CurriculumConfig, CurriculumError, CurriculumTable,
    OrphanFinder,
};
use std::borrow::Cow;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = match &cli.config {
        Some(path) => CurriculumConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => CurriculumConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, config) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 2,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

fn load_table(cli: &CliConfig) -> Result<Cow<'static, CurriculumTable>, CurriculumError> {
    match &cli.table {
        Some(path) => Ok(Cow::Owned(CurriculumTable::from_file(path)?)),
        None => Ok(Cow::Borrowed(CurriculumTable::builtin()?)),
    }
}

fn run(cli: &CliConfig, mut config: CurriculumConfig) -> Result<(), CurriculumError> {
    match &cli.command {
        Command::Roles => {
            let table = load_table(cli)?;
            for role in table.list_roles() {
                println!("{}", role);
            }
        }
        Command::Show { role, sorted } => {
            let table = load_table(cli)?;
            let modules = if *sorted {
                table.ordered_curriculum(role)?
            } else {
                table.get_curriculum(role)?.to_vec()
            };
            for module in modules {
                println!("{:>3}  {:<45}  {}", module.position, module.slug, module.text);
            }
        }
        Command::RolesFor { slug } => {
            let table = load_table(cli)?;
            let roles = table.roles_for_slug(slug);
            if roles.is_empty() {
                tracing::warn!("No role includes {}", slug);
            }
            for role in roles {
                println!("{}", role);
            }
        }
        Command::Export { format, output } => {
            let table = load_table(cli)?;
            let content = export::render(&table, *format)?;
            match output {
                Some(path) => export::write_output(path, &content)?,
                None => print!("{}", content),
            }
        }
        Command::Build {
            root,
            output,
            dry_run,
        } => {
            if let Some(root) = root {
                config.site.root = root.to_string_lossy().into_owned();
            }
            let output_path = output.clone().unwrap_or_else(|| config.output_path());
            let format = ExportFormat::from_path(&output_path).unwrap_or(ExportFormat::Js);

            tracing::info!("🚀 Building curriculum table from {}", config.site.root);
            let table = CurriculumBuilder::new(config).build()?;
            let content = export::render(&table, format)?;

            if *dry_run {
                tracing::info!("🔍 DRY RUN MODE - not writing {}", output_path.display());
                println!("{}", content);
            } else {
                export::write_output(&output_path, &content)?;
                println!(
                    "✅ Wrote {} roles to {}",
                    table.len(),
                    output_path.display()
                );
            }
        }
        Command::Orphans { root } => {
            let root = root.clone().unwrap_or_else(|| config.site_root());
            let finder = OrphanFinder::new(&root, config.orphan_excludes())?;
            println!("Orphaned QMD files:");
            for orphan in finder.find()? {
                println!("{}", orphan);
            }
        }
    }

    Ok(())
}
