use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::importer::template_headers;
use crate::pages::{EditablePage, EntityKind};
use crate::with_editable;

pub fn run(kind: EntityKind, output: Option<&Path>) -> Result<()> {
    let headers = with_editable!(kind, E => Ok(headers::<E>()))?;
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            write_template(file, &headers)?;
            println!("Template written to {}", path.display());
        }
        None => write_template(std::io::stdout().lock(), &headers)?,
    }
    Ok(())
}

fn headers<E: EditablePage>() -> Vec<&'static str> {
    template_headers::<E::Form>()
}

/// The template is the header row alone: the field keys the importer reads.
pub fn write_template<W: Write>(out: W, headers: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(headers)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;

    #[test]
    fn test_template_round_trips_through_importer() {
        let mut buf = Vec::new();
        write_template(&mut buf, &headers::<Transaction>()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            concat!(
                "date,amount,description,type,accountId,categoryId,",
                "costCenterId,partnerId,notes,status\n"
            )
        );
        assert!(crate::upload::parse_csv(&text).is_empty());
    }

    #[test]
    fn test_read_only_pages_have_no_template() {
        assert!(run(EntityKind::Clients, None).is_err());
    }
}
