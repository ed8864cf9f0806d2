//! SARIF findings sink
//!
//! Serializes the abstract finding list into SARIF 2.1.0 (rule catalog plus
//! result list) so CI systems and code hosts can ingest the report. The core
//! pipeline only ever deals in [`Finding`] values; this adapter owns the wire
//! format.

use crate::report::{Finding, FindingCategory};
use crate::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub version: &'static str,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: &'static str,
    pub short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: &'static str,
    pub level: &'static str,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

#[derive(Debug, Serialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u64>,
}

/// Build a SARIF log from the finding list and a tool name/version header.
pub fn to_sarif(findings: &[Finding], tool_name: &str, tool_version: &str) -> SarifLog {
    let rules = FindingCategory::all()
        .iter()
        .map(|category| SarifRule {
            id: category.id(),
            short_description: SarifMessage {
                text: category.description().to_string(),
            },
        })
        .collect();

    let results = findings
        .iter()
        .map(|finding| SarifResult {
            rule_id: finding.category.id(),
            level: "error",
            message: SarifMessage {
                text: finding.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation {
                        uri: finding.file.to_string_lossy().replace('\\', "/"),
                    },
                    region: SarifRegion {
                        start_line: finding.line,
                        start_column: finding.column,
                    },
                },
            }],
        })
        .collect();

    SarifLog {
        schema: "https://json.schemastore.org/sarif-2.1.0.json",
        version: "2.1.0",
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: tool_name.to_string(),
                    version: tool_version.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Serialize findings straight to pretty-printed SARIF JSON.
pub fn to_json(findings: &[Finding], tool_name: &str, tool_version: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_sarif(
        findings,
        tool_name,
        tool_version,
    ))?)
}
