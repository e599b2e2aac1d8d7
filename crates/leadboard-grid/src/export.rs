use crate::error::{GridError, Result};
use leadboard_core::Lead;
use std::fmt::Write as _;
use std::str::FromStr;

pub const EXPORT_HEADERS: [&str; 5] = ["ID", "Name", "Company", "Status", "Lead Score"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Excel => "application/vnd.ms-excel",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = GridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xls" => Ok(ExportFormat::Excel),
            other => Err(GridError::Export(format!("unknown export format: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    All,
    Selected,
}

impl ExportScope {
    pub fn file_name(self, format: ExportFormat) -> String {
        let stem = match self {
            ExportScope::All => "leads_export",
            ExportScope::Selected => "selected_leads_export",
        };
        format!("{stem}.{}", format.extension())
    }
}

/// A rendered export, ready to hand to the download writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime: &'static str,
    pub contents: Vec<u8>,
}

pub fn render(format: ExportFormat, scope: ExportScope, records: &[&Lead]) -> Result<ExportFile> {
    let contents = match format {
        ExportFormat::Csv => export_csv(records)?,
        ExportFormat::Excel => export_excel(records),
    };
    Ok(ExportFile {
        file_name: scope.file_name(format),
        mime: format.mime(),
        contents: contents.into_bytes(),
    })
}

/// Header line, then one line per record. Id and score are written bare; the text columns are
/// always quoted, whatever they contain.
pub fn export_csv(records: &[&Lead]) -> Result<String> {
    let mut header = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(EXPORT_HEADERS)?;
    let bytes = header
        .into_inner()
        .map_err(|err| GridError::Export(err.to_string()))?;
    let mut out = String::from_utf8(bytes).map_err(|err| GridError::Export(err.to_string()))?;

    for lead in records {
        let text = quoted_fields([
            lead.name.as_str(),
            lead.company.as_str(),
            lead.status.as_str(),
        ])?;
        let _ = writeln!(out, "{},{},{}", lead.id, text, lead.lead_score);
    }
    Ok(out)
}

fn quoted_fields(fields: [&str; 3]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let mut bytes = writer
        .into_inner()
        .map_err(|err| GridError::Export(err.to_string()))?;
    bytes.pop();
    String::from_utf8(bytes).map_err(|err| GridError::Export(err.to_string()))
}

/// An HTML table spreadsheet applications open as a worksheet.
pub fn export_excel(records: &[&Lead]) -> String {
    let mut out = String::from("<table>\n<tr>");
    for header in EXPORT_HEADERS {
        let _ = write!(out, "<th>{}</th>", escape_html(header));
    }
    out.push_str("</tr>\n");
    for lead in records {
        out.push_str("<tr>");
        for cell in [
            lead.id.to_string(),
            lead.name.clone(),
            lead.company.clone(),
            lead.status.to_string(),
            lead.lead_score.to_string(),
        ] {
            let _ = write!(out, "<td>{}</td>", escape_html(&cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{export_csv, export_excel, ExportFormat, ExportScope};
    use leadboard_core::{Lead, LeadStatus};

    fn lead(id: i64, name: &str, company: &str, status: LeadStatus, score: i64) -> Lead {
        let mut lead: Lead = serde_json::from_value(serde_json::json!({ "id": id })).unwrap();
        lead.name = name.to_string();
        lead.company = company.to_string();
        lead.status = status;
        lead.lead_score = score;
        lead
    }

    #[test]
    fn csv_quotes_text_columns_even_when_numeric_looking() {
        let a = lead(1, "42", "", LeadStatus::Hot, 5);
        let b = lead(2, "1e5", "3.14", LeadStatus::New, -3);
        let c = lead(3, "inf", "007", LeadStatus::Cold, 0);
        assert_eq!(
            export_csv(&[&a, &b, &c]).unwrap(),
            "ID,Name,Company,Status,Lead Score\n\
             1,\"42\",\"\",\"Hot\",5\n\
             2,\"1e5\",\"3.14\",\"New\",-3\n\
             3,\"inf\",\"007\",\"Cold\",0\n"
        );
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let a = lead(7, "Say \"hi\", ok", "A,B\nC", LeadStatus::Warm, 10);
        assert_eq!(
            export_csv(&[&a]).unwrap(),
            "ID,Name,Company,Status,Lead Score\n7,\"Say \"\"hi\"\", ok\",\"A,B\nC\",\"Warm\",10\n"
        );
    }

    #[test]
    fn excel_escapes_markup() {
        let a = lead(4, "<b>Tom & 'Jerry'</b>", "\"Quoted\" Inc", LeadStatus::Hot, 1);
        assert_eq!(
            export_excel(&[&a]),
            "<table>\n\
             <tr><th>ID</th><th>Name</th><th>Company</th><th>Status</th><th>Lead Score</th></tr>\n\
             <tr><td>4</td><td>&lt;b&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;</td>\
             <td>&quot;Quoted&quot; Inc</td><td>Hot</td><td>1</td></tr>\n\
             </table>\n"
        );
    }

    #[test]
    fn empty_exports_are_header_only() {
        assert_eq!(export_csv(&[]).unwrap(), "ID,Name,Company,Status,Lead Score\n");
        let html = export_excel(&[]);
        assert!(html.contains("<th>Lead Score</th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn file_names_follow_scope() {
        assert_eq!(
            ExportScope::All.file_name(ExportFormat::Csv),
            "leads_export.csv"
        );
        assert_eq!(
            ExportScope::Selected.file_name(ExportFormat::Excel),
            "selected_leads_export.xls"
        );
        assert_eq!("XLS".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
