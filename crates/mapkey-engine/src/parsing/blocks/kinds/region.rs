use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::rope::span::Span;

/// Folding region marker parsed from a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSig {
    Start {
        /// Local span of the marker text, `!` through the last non-blank byte.
        marker: Span,
        label: Option<String>,
    },
    End {
        marker: Span,
    },
}

/// Document-level `!#region` / `!#endregion` markers.
pub struct Region;

impl Region {
    pub fn sig(line: &str) -> Option<RegionSig> {
        static REGION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGION_REGEX.get_or_init(|| {
            Regex::new(r"^[ \t]*(!\s*#(region|endregion)\b(?:[ \t]+(\S.*?))?)[ \t]*$")
                .expect("Invalid region regex")
        });

        let caps = re.captures(line)?;
        let whole = caps.get(1)?;
        let marker = Span::new(whole.start(), whole.end());
        if &caps[2] == "endregion" {
            return Some(RegionSig::End { marker });
        }
        let label = caps.get(3).map(|m| m.as_str().to_string());
        Some(RegionSig::Start { marker, label })
    }
}
