//! Design command implementation

use super::{load_input, write_export};
use crate::cli::error::CliError;
use crate::cli::output::format_schema_import;
use crate::designer::{SQL_TEMPLATES, SchemaDesigner};
use chrono::Utc;
use std::path::PathBuf;

/// Arguments for the `design` command
pub struct DesignArgs {
    /// SQL file to import (`-` for stdin)
    pub input: Option<String>,
    /// Built-in template to start from
    pub template: Option<String>,
    /// Tables whose row-level security flag is flipped after import
    pub toggle_rls: Vec<String>,
    /// Write `database-design-<ms>.sql` here instead of printing
    pub output_dir: Option<PathBuf>,
    /// Print the template names and exit
    pub list_templates: bool,
}

/// Handle the `design` command
pub fn handle_design(args: &DesignArgs) -> Result<(), CliError> {
    if args.list_templates {
        for template in SQL_TEMPLATES.iter() {
            println!("{}", template.name);
        }
        return Ok(());
    }

    let mut designer = SchemaDesigner::new();
    let result = match (&args.template, &args.input) {
        (Some(name), _) => designer.load_template(name)?,
        (None, Some(input)) => designer.import_sql(&load_input(input)?),
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "Provide --input or --template".to_string(),
            ));
        }
    };
    eprint!("{}", format_schema_import(&result));

    for name in &args.toggle_rls {
        let table_id = designer
            .tables()
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .map(|t| t.id)
            .ok_or_else(|| CliError::InvalidArgument(format!("No table named {}", name)))?;
        designer.toggle_row_security(table_id)?;
    }

    match &args.output_dir {
        Some(dir) => {
            let path = write_export(&designer.export_file(Utc::now()), dir)?;
            println!("Saved {}", path.display());
        }
        None => println!("{}", designer.generate_sql()),
    }
    Ok(())
}
