// NHL team abbreviation normalization.
//
// Source files mix dotted codes (T.B.), short codes (TB) and city prefixes
// (TAM) for the same franchise. Everything is folded onto the current
// three-letter code.

/// Current franchise codes. Anything outside this set that is not an alias
/// is passed through and flagged.
const FRANCHISE_CODES: &[&str] = &[
    "ANA", "ARI", "BOS", "BUF", "CAR", "CBJ", "CGY", "CHI", "COL", "DAL", "DET", "EDM", "FLA",
    "LAK", "MIN", "MTL", "NJD", "NSH", "NYI", "NYR", "OTT", "PHI", "PIT", "SEA", "SJS", "STL",
    "TBL", "TOR", "UTA", "VAN", "VGK", "WPG", "WSH",
];

/// Known aliases and the franchise code they map to.
const ALIASES: &[(&str, &str)] = &[
    ("T.B.", "TBL"),
    ("T.B", "TBL"),
    ("TB", "TBL"),
    ("TAM", "TBL"),
    ("S.J.", "SJS"),
    ("S.J", "SJS"),
    ("SJ", "SJS"),
    ("SAN", "SJS"),
    ("N.J.", "NJD"),
    ("N.J", "NJD"),
    ("NJ", "NJD"),
    ("NJ DEVILS", "NJD"),
    ("L.A.", "LAK"),
    ("L.A", "LAK"),
    ("LA", "LAK"),
    ("LOS", "LAK"),
    ("M.T.L.", "MTL"),
    ("M.T.L", "MTL"),
    ("MTL.", "MTL"),
    ("MON", "MTL"),
    ("N.Y.I.", "NYI"),
    ("N.Y.I", "NYI"),
    ("N.Y.R.", "NYR"),
    ("N.Y.R", "NYR"),
    ("W.P.G.", "WPG"),
    ("V.G.K.", "VGK"),
];

/// Outcome of normalizing a raw team code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamCode {
    /// Already a current franchise code.
    Known(String),
    /// Rewritten through the alias table.
    Mapped { raw: String, code: String },
    /// Not recognised; passed through with dots stripped and uppercased.
    Unmapped(String),
}

impl TeamCode {
    pub fn code(&self) -> &str {
        match self {
            TeamCode::Known(code) => code,
            TeamCode::Mapped { code, .. } => code,
            TeamCode::Unmapped(code) => code,
        }
    }

    pub fn into_code(self) -> String {
        match self {
            TeamCode::Known(code) => code,
            TeamCode::Mapped { code, .. } => code,
            TeamCode::Unmapped(code) => code,
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, TeamCode::Unmapped(_))
    }
}

/// Normalize a raw team abbreviation.
pub fn normalize_team(raw: &str) -> TeamCode {
    let trimmed = raw.trim();
    let upper = trimmed.to_uppercase();

    if let Some((_, code)) = ALIASES.iter().find(|(alias, _)| *alias == upper) {
        return TeamCode::Mapped {
            raw: trimmed.to_string(),
            code: (*code).to_string(),
        };
    }

    let stripped = upper.replace('.', "");
    if FRANCHISE_CODES.contains(&stripped.as_str()) {
        TeamCode::Known(stripped)
    } else {
        TeamCode::Unmapped(stripped)
    }
}

/// Official NHL logo URL for a team code.
pub fn team_logo_url(code: &str) -> String {
    let clean = code.replace('.', "").to_uppercase();
    format!("https://assets.nhle.com/logos/nhl/svg/{clean}_light.svg")
}
