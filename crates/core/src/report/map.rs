use crate::domain::market::IndexRecord;
use crate::stats;
use serde_json::{json, Value};

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const DEFAULT_ELEMENT_ID: &str = "global-impact-map";
const DEFAULT_HEIGHT: u32 = 400;
const COLOR_AXIS_TITLE: &str = "Market Change (%)";

#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethMap {
    pub locations: Vec<&'static str>,
    pub countries: Vec<String>,
    pub changes: Vec<f64>,
    pub color_range: (f64, f64),
    pub height: u32,
}

impl ChoroplethMap {
    pub fn from_records(records: &[IndexRecord]) -> Option<Self> {
        let (min, max) = stats::extremes(records)?;

        let mut locations = Vec::with_capacity(records.len());
        let mut countries = Vec::with_capacity(records.len());
        let mut changes = Vec::with_capacity(records.len());
        for record in records {
            let Some(code) = stats::lookup_map_code(&record.country) else {
                tracing::warn!(country = %record.country, "no map geometry for country; omitted from map");
                continue;
            };
            locations.push(code);
            countries.push(record.country.clone());
            changes.push(record.percent_change);
        }

        Some(Self {
            locations,
            countries,
            changes,
            color_range: color_range(min, max),
            height: DEFAULT_HEIGHT,
        })
    }

    pub fn figure(&self) -> Value {
        let labels: Vec<String> = self.changes.iter().map(|c| format!("{c:.1}%")).collect();
        json!({
            "data": [{
                "type": "choropleth",
                "locationmode": "ISO-3",
                "locations": self.locations,
                "z": self.changes,
                "text": labels,
                "hovertext": self.countries,
                "hovertemplate": "<b>%{hovertext}</b><br>Market Change (%): %{z:.2f}<extra></extra>",
                "colorscale": "Reds",
                "reversescale": true,
                "zmin": self.color_range.0,
                "zmax": self.color_range.1,
                "colorbar": {
                    "title": {"text": COLOR_AXIS_TITLE},
                    "thicknessmode": "pixels",
                    "thickness": 20,
                    "lenmode": "pixels",
                    "len": 300,
                    "yanchor": "middle"
                }
            }],
            "layout": {
                "height": self.height,
                "margin": {"l": 0, "r": 0, "t": 0, "b": 0},
                "geo": {
                    "showframe": false,
                    "showcoastlines": true,
                    "projection": {"type": "equirectangular"}
                }
            }
        })
    }

    pub fn to_html(&self) -> String {
        self.to_html_with_id(DEFAULT_ELEMENT_ID)
    }

    pub fn to_html_with_id(&self, element_id: &str) -> String {
        let figure = self.figure();
        let data = script_safe_json(&figure["data"]);
        let layout = script_safe_json(&figure["layout"]);
        format!(
            "<div id=\"{element_id}\" style=\"height:{height}px;width:100%;\"></div>\n\
<script src=\"{PLOTLY_CDN}\" charset=\"utf-8\"></script>\n\
<script>Plotly.newPlot(\"{element_id}\", {data}, {layout}, {{\"responsive\": true}});</script>\n",
            height = self.height,
        )
    }
}

fn color_range(min: f64, max: f64) -> (f64, f64) {
    if min < 0.0 {
        (min, 0.0)
    } else {
        (min, max)
    }
}

fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
