//! Per-interface compliance sub-reports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Pass,
    Fail,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceField {
    pub status: FieldStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComplianceField {
    pub fn pass(value: impl Into<Value>) -> Self {
        ComplianceField {
            status: FieldStatus::Pass,
            value: Some(value.into()),
            detail: None,
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        ComplianceField {
            status: FieldStatus::Fail,
            value: None,
            detail: Some(detail.into()),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        ComplianceField {
            status: FieldStatus::Error,
            value: None,
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Erc721Compliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ComplianceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<ComplianceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_of: Option<ComplianceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<ComplianceField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Erc2981Compliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub royalty_info: Option<ComplianceField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Erc4907Compliance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_of: Option<ComplianceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_expires: Option<ComplianceField>,
    pub rental_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc721: Option<Erc721Compliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc2981: Option<Erc2981Compliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc4907: Option<Erc4907Compliance>,
    pub overall_pass: bool,
}

fn field_is_fail(field: &Option<ComplianceField>) -> bool {
    matches!(field, Some(f) if f.status == FieldStatus::Fail)
}

impl ComplianceReport {
    /// Recompute `overall_pass` from the sub-fields: `fail` if any field in
    /// any present sub-report is `fail`, `pass` otherwise (an `error` field
    /// does not by itself fail the overall report — the call simply
    /// couldn't be made, which is not evidence of non-compliance).
    pub fn finalize(mut self) -> Self {
        let any_fail = self
            .erc721
            .as_ref()
            .map(|r| {
                field_is_fail(&r.name)
                    || field_is_fail(&r.symbol)
                    || field_is_fail(&r.owner_of)
                    || field_is_fail(&r.total_supply)
            })
            .unwrap_or(false)
            || self
                .erc2981
                .as_ref()
                .map(|r| field_is_fail(&r.royalty_info))
                .unwrap_or(false)
            || self
                .erc4907
                .as_ref()
                .map(|r| field_is_fail(&r.user_of) || field_is_fail(&r.user_expires))
                .unwrap_or(false);
        self.overall_pass = !any_fail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_fail_field_fails_the_report() {
        let report = ComplianceReport {
            erc721: Some(Erc721Compliance {
                name: Some(ComplianceField::pass("x")),
                symbol: Some(ComplianceField::fail("empty")),
                owner_of: Some(ComplianceField::pass("0x1")),
                total_supply: None,
            }),
            ..Default::default()
        }
        .finalize();
        assert!(!report.overall_pass);
    }

    #[test]
    fn error_fields_alone_do_not_fail_the_report() {
        let report = ComplianceReport {
            erc721: Some(Erc721Compliance {
                name: Some(ComplianceField::error("call failed")),
                symbol: None,
                owner_of: None,
                total_supply: None,
            }),
            ..Default::default()
        }
        .finalize();
        assert!(report.overall_pass);
    }
}
