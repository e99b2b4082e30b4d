use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::models::{Result, SiteRecord};

const HEADERS: [&str; 3] = ["Company Name", "Emails", "Contact Phone"];

pub struct SpreadsheetExporter;

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the result table: bold header row, then one string-typed row
    /// per site in the order given.
    pub async fn export(&self, records: &[SiteRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet.write_string(row, 0, &record.company_name)?;
            worksheet.write_string(row, 1, &record.emails)?;
            worksheet.write_string(row, 2, &record.phone)?;
        }

        workbook.save(path)?;
        info!("💾 Wrote {} row(s) to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_a_spreadsheet_file() {
        let path = std::env::temp_dir().join("contact_scraper_export_test.xlsx");
        let records = vec![
            SiteRecord {
                company_name: "Example".to_string(),
                emails: "info@example.com".to_string(),
                phone: "None".to_string(),
            },
            SiteRecord {
                company_name: "A".to_string(),
                emails: "None".to_string(),
                phone: "123 4567 890".to_string(),
            },
        ];

        SpreadsheetExporter::new()
            .export(&records, &path)
            .await
            .unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        assert!(metadata.len() > 0);
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn creates_missing_output_directory() {
        let dir = std::env::temp_dir().join("contact_scraper_export_dir_test");
        let _ = tokio::fs::remove_dir_all(&dir).await;
        let path = dir.join("contact_info.xlsx");

        SpreadsheetExporter::new().export(&[], &path).await.unwrap();

        assert!(tokio::fs::metadata(&path).await.is_ok());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
