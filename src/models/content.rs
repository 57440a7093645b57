use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CaseStudy {
    pub title: &'static str,
    pub client: &'static str,
    pub sector: &'static str,
    pub challenge: &'static str,
    pub approach: &'static str,
    pub outcomes: &'static [&'static str],
    pub quote: Option<&'static str>,
    pub quote_author: Option<&'static str>,
    pub metrics: Option<&'static [Metric]>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Accreditation {
    pub body: &'static str,
    pub levels: &'static [&'static str],
    pub description: &'static str,
    /// Image paths served by the frontend.
    pub badges: &'static [&'static str],
}

pub const CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        title: "Leadership capability uplift in NHS Trust",
        client: "NHS Trust (North of England)",
        sector: "NHS",
        challenge: "Inconsistent people leadership at Band 6–8a impacting patient flow and staff engagement",
        approach: "Blended programme (ILM Level 5-aligned) with action learning sets, coaching, and on-the-job projects",
        outcomes: &[
            "12% improvement in staff engagement index",
            "8% reduction in short-term sickness",
            "Faster escalation and decision-making on wards",
        ],
        quote: Some("The programme has transformed how our middle managers lead day-to-day."),
        quote_author: Some("Deputy Director of HR"),
        metrics: None,
    },
    CaseStudy {
        title: "Operational excellence in Local Authority services",
        client: "Metropolitan Borough Council",
        sector: "Local Government",
        challenge: "Service backlogs and low morale across customer services",
        approach: "Leadership & management fundamentals (CMI Level 3-aligned) and coaching for team leaders",
        outcomes: &[
            "Average case closure time reduced by 22%",
            "CSAT improved from 71% to 84%",
            "First-line resolution up by 15%",
        ],
        quote: Some("Clear, practical, and tailored to our context."),
        quote_author: Some("Head of Customer Services"),
        metrics: None,
    },
];

pub const ACCREDITATIONS: &[Accreditation] = &[
    Accreditation {
        body: "ILM",
        levels: &["Level 3", "Level 5", "Level 7"],
        description: "Programmes aligned to ILM standards with practical assessment and work-based learning",
        badges: &["/ilm-badge.svg"],
    },
    Accreditation {
        body: "CMI",
        levels: &["Level 3", "Level 5"],
        description: "Management and leadership pathways mapped to the CMI Professional Standard",
        badges: &["/cmi-badge.svg"],
    },
    Accreditation {
        body: "Apprenticeships",
        levels: &[
            "Team Leader/Supervisor L3",
            "Operations/Departmental Manager L5",
        ],
        description: "Alignment to apprenticeship standards and off-the-job training requirements",
        badges: &["/apprenticeship-badge.svg"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_populated() {
        assert_eq!(CASE_STUDIES.len(), 2);
        assert_eq!(ACCREDITATIONS.len(), 3);
        assert!(CASE_STUDIES.iter().all(|c| !c.outcomes.is_empty()));
        assert!(ACCREDITATIONS.iter().all(|a| !a.levels.is_empty()));
    }

    #[test]
    fn test_case_study_serializes_missing_metrics_as_null() {
        let json = serde_json::to_value(CASE_STUDIES[0]).unwrap();
        assert_eq!(json["sector"], "NHS");
        assert!(json["metrics"].is_null());
        assert_eq!(json["outcomes"].as_array().unwrap().len(), 3);
    }
}
