use crate::ir::{AdjacencyPattern, Region, Room, RoomId, Scenario};
use crate::layout::h_shape_regions;
use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

const NUM: &str = r"-?\d+(?:\.\d+)?";

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());
static ROOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^room\s+(\d+)(?:\s+(?:"([^"]*)"|([A-Za-z_][\w\-]*)))?\s+({NUM})\s*x\s*({NUM})(\s+fixed)?$"#
    ))
    .unwrap()
});
static REGION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^region\s+({NUM})\s+({NUM})\s+({NUM})\s+({NUM})(?:\s+"([^"]*)")?$"#
    ))
    .unwrap()
});
static HSHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^hshape\s+({NUM})\s+({NUM})\s+({NUM})$")).unwrap());
static ADJACENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^adjacent\s+(\d+(?:\s+\d+)+)$").unwrap());
static PATTERN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^pattern\s+([\w\-]+)$").unwrap());

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub scenario: Scenario,
    pub init_config: Option<serde_json::Value>,
}

/// Parses the line-oriented scenario format.
///
/// ```text
/// %%{init: {"preset": "optimal"}}%%
/// hshape 15 15 3
/// room 0 "Living Room" 3x4
/// room 1 Kitchen 2x3 fixed
/// adjacent 0 1
/// ```
///
/// Dimensions are only checked for syntax here; value checks happen when the
/// scenario is laid out.
pub fn parse_scenario(input: &str) -> Result<ParseOutput> {
    let mut output = ParseOutput::default();
    let mut pattern: Option<AdjacencyPattern> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(line) {
            let json_str = &caps[1];
            let value = serde_json::from_str::<serde_json::Value>(json_str)
                .or_else(|_| json5::from_str::<serde_json::Value>(json_str))
                .map_err(|err| anyhow!("line {line_no}: invalid init directive: {err}"))?;
            output.init_config = Some(value);
            continue;
        }
        if line.starts_with("%%") {
            continue;
        }

        let scenario = &mut output.scenario;
        if let Some(caps) = ROOM_RE.captures(line) {
            let id: RoomId = parse_field(&caps[1], line_no)?;
            let width = parse_field(&caps[4], line_no)?;
            let height = parse_field(&caps[5], line_no)?;
            let mut room = Room::new(id, width, height);
            if let Some(name) = caps.get(2).or_else(|| caps.get(3)) {
                room = room.named(name.as_str());
            }
            if caps.get(6).is_some() {
                room = room.fixed();
            }
            scenario.rooms.push(room);
        } else if let Some(caps) = REGION_RE.captures(line) {
            let mut region = Region::new(
                parse_field(&caps[1], line_no)?,
                parse_field(&caps[2], line_no)?,
                parse_field(&caps[3], line_no)?,
                parse_field(&caps[4], line_no)?,
            );
            if let Some(name) = caps.get(5) {
                region = region.named(name.as_str());
            }
            scenario.regions.push(region);
        } else if let Some(caps) = HSHAPE_RE.captures(line) {
            let regions = h_shape_regions(
                parse_field(&caps[1], line_no)?,
                parse_field(&caps[2], line_no)?,
                parse_field(&caps[3], line_no)?,
            )
            .map_err(|err| anyhow!("line {line_no}: {err}"))?;
            scenario.regions.extend(regions);
        } else if let Some(caps) = ADJACENT_RE.captures(line) {
            let ids = caps[1]
                .split_whitespace()
                .map(|token| parse_field::<RoomId>(token, line_no))
                .collect::<Result<Vec<_>>>()?;
            if let Some((&first, rest)) = ids.split_first() {
                scenario.adjacency.extend(rest.iter().map(|&other| (first, other)));
            }
        } else if let Some(caps) = PATTERN_RE.captures(line) {
            let token = &caps[1];
            pattern = Some(
                AdjacencyPattern::from_token(token)
                    .ok_or_else(|| anyhow!("line {line_no}: unknown pattern '{token}'"))?,
            );
        } else {
            return Err(anyhow!("line {line_no}: unrecognized statement '{line}'"));
        }
    }

    // patterns run over the full catalog, wherever they appear
    if let Some(pattern) = pattern {
        output.scenario.apply_pattern(pattern);
    }
    Ok(output)
}

fn parse_field<T: std::str::FromStr>(token: &str, line_no: usize) -> Result<T> {
    token
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("line {line_no}: invalid number '{token}'"))
}
