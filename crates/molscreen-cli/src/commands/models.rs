use crate::cli::{ModelsArgs, ModelsCommands};
use crate::error::Result;
use molscreen::models::registry::{self, ModelRegistry};
use std::io::Write;
use tracing::info;

pub fn run(args: ModelsArgs) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match args.command {
        ModelsCommands::List => list(registry::global(), &mut stdout),
        ModelsCommands::Show { name } => show(registry::global(), &name, &mut stdout),
    }
}

fn list(registry: &ModelRegistry, out: &mut impl Write) -> Result<()> {
    let names = registry.names();
    info!("{} model(s) registered.", names.len());
    for name in names {
        let model = registry.create(&name)?;
        writeln!(out, "{:<24} {}", name, model.family())?;
    }
    Ok(())
}

fn show(registry: &ModelRegistry, name: &str, out: &mut impl Write) -> Result<()> {
    let model = registry.create(name)?;
    writeln!(out, "{}", model.name())?;
    writeln!(out, "  family:  {}", model.family())?;
    writeln!(out, "  summary: {}", model.summary())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use molscreen::models::RegistryError;

    #[test]
    fn list_prints_every_registered_name() {
        let registry = ModelRegistry::new();
        let mut out = Vec::new();
        list(&registry, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), registry.names().len());
        assert!(text.lines().any(|line| line.starts_with("rdkt_fcfp")));
    }

    #[test]
    fn show_describes_the_model() {
        let mut out = Vec::new();
        show(&ModelRegistry::new(), "nbit_ecfp2", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("nbit_ecfp2\n"));
        assert!(text.contains("radius 1"));
    }

    #[test]
    fn show_reports_unknown_names() {
        let mut out = Vec::new();
        let err = show(&ModelRegistry::new(), "not_a_model", &mut out).unwrap_err();
        assert!(matches!(
            err,
            CliError::Registry(RegistryError::ModelNotFound { .. })
        ));
        assert!(out.is_empty());
    }
}
