//! Header label dictionaries per report flavor.

use crate::config::DocumentKind;

/// Header labels of the executive summary, keyed by exact run text.
const SUMMARY_LABELS: &[(&str, &str)] = &[
    ("IP Address", "Component"),
    (
        "Vulnerabilities Noted per IP address",
        "Vulnerabilities Noted per Component",
    ),
    ("Severity Level", "Severity Level"),
    ("CVSSv2 Score", "CVSS Score"),
    ("Compliance Status", "Compliance Status"),
    (
        "Exceptions, False Positives, or Compensating Controls Noted by the ASV for this Vulnerability",
        "Exceptions, False Positives, or Compensating Controls Noted by the ASV for this Vulnerability",
    ),
    ("Scan Customer Company: ", "Scan Customer Company: "),
    ("ASV Company: ", "ASV Company: "),
    ("Remediation Step", "Remediation Step"),
    ("Estimated Time", "Estimated Time"),
];

/// Header labels of the vulnerability detail report.
const DETAIL_LABELS: &[(&str, &str)] = &[
    ("Scan Customer Company:", "Scan Customer Company: "),
    ("ASV Company:", "ASV Company: "),
    ("Severity", "Severity"),
    ("High", "High"),
    ("IP Address", "Component"),
    ("Port", "Detected Open Ports, Services/ Protocols"),
    ("Evidence", "Vulnerability"),
    ("Compliance Status", "Compliance Status"),
    (
        "Exceptions, False Positives, or Compensating Controls Noted by the ASV for this Vulnerability",
        "Details",
    ),
    ("Instance", "Instance"),
];

/// The label dictionary of a report flavor.
pub fn label_map(kind: DocumentKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        DocumentKind::ExecutiveSummary => SUMMARY_LABELS,
        DocumentKind::VulnerabilityDetail => DETAIL_LABELS,
    }
}

/// Replacement for a header run text, if the flavor's dictionary has one.
///
/// Identity entries count as hits: the run is still recolored.
pub fn relabel(kind: DocumentKind, text: &str) -> Option<&'static str> {
    label_map(kind)
        .iter()
        .find(|(from, _)| *from == text)
        .map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relabel_detail() {
        let kind = DocumentKind::VulnerabilityDetail;
        assert_eq!(relabel(kind, "Evidence"), Some("Vulnerability"));
        assert_eq!(relabel(kind, "IP Address"), Some("Component"));
        assert_eq!(relabel(kind, "Instance"), Some("Instance"));
        assert_eq!(relabel(kind, "evidence"), None);
        assert_eq!(relabel(kind, "CVSSv2 Score"), None);
    }

    #[test]
    fn test_relabel_summary() {
        let kind = DocumentKind::ExecutiveSummary;
        assert_eq!(relabel(kind, "CVSSv2 Score"), Some("CVSS Score"));
        assert_eq!(relabel(kind, "Scan Customer Company: "), Some("Scan Customer Company: "));
        assert_eq!(relabel(kind, "Scan Customer Company:"), None);
        assert_eq!(relabel(kind, "Evidence"), None);
    }

    #[test]
    fn test_relabel_is_not_idempotent() {
        let kind = DocumentKind::VulnerabilityDetail;
        let once = relabel(kind, "Port").unwrap();
        assert_eq!(relabel(kind, once), None);
    }
}
