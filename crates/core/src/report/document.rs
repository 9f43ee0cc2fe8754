use crate::time::{footer_date, report_file_name, AnalysisPeriod};
use anyhow::Context;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Global Tariff Impact Report";
const FOOTER_TAG: &str = "Echoes of Liberation Day Analysis";

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; padding: 0; color: #333; line-height: 1.6; background-color: #f9f9f9; }
.container { max-width: 1200px; margin: 0 auto; padding: 40px 20px; background-color: white; box-shadow: 0 0 20px rgba(0,0,0,0.05); }
header { text-align: center; margin-bottom: 40px; padding-bottom: 20px; border-bottom: 1px solid #eaeaea; }
h1 { color: #1e3a8a; font-size: 32px; margin-bottom: 10px; }
h2 { color: #1e3a8a; font-size: 24px; border-bottom: 2px solid #1e3a8a; padding-bottom: 8px; margin-top: 40px; }
h3 { color: #2563eb; font-size: 20px; margin-top: 30px; }
p { margin-bottom: 16px; text-align: justify; }
ul, ol { margin-bottom: 20px; padding-left: 25px; }
li { margin-bottom: 8px; }
.section-header { font-size: 22px; color: #1e3a8a; border-bottom: 2px solid #1e3a8a; padding-bottom: 5px; margin-top: 20px; }
.highlight { background-color: #f0f9ff; padding: 20px; border-radius: 10px; margin: 25px 0; border-left: 4px solid #3b82f6; }
.negative { color: #ef4444; font-weight: bold; }
.positive { color: #10b981; font-weight: bold; }
.map-container { margin: 40px 0; padding: 20px; background-color: white; border-radius: 10px; box-shadow: 0 4px 6px rgba(0,0,0,0.05); }
.map-title { text-align: center; margin-bottom: 20px; color: #1e3a8a; font-size: 24px; }
table { width: 100%; border-collapse: collapse; margin: 25px 0; font-size: 14px; }
th { background-color: #1e3a8a; color: white; font-weight: bold; padding: 12px; text-align: left; }
td { padding: 10px 12px; border-bottom: 1px solid #eaeaea; }
tr:nth-child(even) { background-color: #f8fafc; }
.data-table-container { margin: 40px 0; overflow-x: auto; box-shadow: 0 4px 6px rgba(0,0,0,0.05); border-radius: 10px; background-color: white; padding: 20px; }
.data-table { width: 100%; min-width: 800px; }
.data-table th { position: sticky; top: 0; z-index: 10; }
.footer { text-align: center; margin-top: 60px; padding-top: 20px; border-top: 1px solid #eaeaea; color: #6b7280; font-size: 14px; }
strong, b { font-weight: 600; color: #1f2937; }
strong.negative { color: #ef4444; }
strong.positive { color: #10b981; }
"#;

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
}

impl RenderedDocument {
    pub fn data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(self.html.as_bytes());
        format!("data:text/html;base64,{encoded}")
    }

    pub fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.html)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(path)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentParts {
    pub narrative_html: String,
    pub map_html: Option<String>,
    pub table_html: String,
}

pub fn assemble(
    parts: &DocumentParts,
    period: &AnalysisPeriod,
    generated_at: DateTime<Utc>,
) -> RenderedDocument {
    let map_section = match &parts.map_html {
        Some(map_html) => format!(
            "<div class=\"map-container\">\n\
<h2 class=\"map-title\">Global Market Impact Map</h2>\n\
<p>The map below illustrates the percentage change in major market indices across different countries during the analysis period.</p>\n\
{map_html}</div>\n"
        ),
        None => String::new(),
    };

    let html = format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>{REPORT_TITLE}</title>\n\
<style>{STYLE}</style>\n\
</head>\n\
<body>\n\
<div class=\"container\">\n\
<header>\n\
<h1>{REPORT_TITLE}</h1>\n\
<h4>Analysis Period: {period_label}</h4>\n\
</header>\n\
<div class=\"content\">\n\
<div class=\"report-content\">\n{narrative}</div>\n\
{map_section}\
<div class=\"data-table-container\">\n{table}</div>\n\
</div>\n\
<div class=\"footer\">\n\
<p>Generated on {footer} | {FOOTER_TAG}</p>\n\
</div>\n\
</div>\n\
</body>\n\
</html>\n",
        period_label = period.header_label(),
        narrative = parts.narrative_html,
        table = parts.table_html,
        footer = footer_date(&generated_at),
    );

    RenderedDocument {
        html,
        file_name: report_file_name(&generated_at),
        generated_at,
    }
}
