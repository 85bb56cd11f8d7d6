use std::sync::LazyLock;

use anyhow::{anyhow, bail};
use regex::Regex;
use sleigh_core::{ParseError, PartSolver, PuzzleParser, PuzzleSolver, SolveError};

use crate::utils::combat::{Battle, Group, Side, minimal_boost};
use crate::utils::parsing::lenient_lines;

/// Largest attack boost tried for the immune system.
const MAX_BOOST: u64 = 10_000;

static GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d+) units each with (\d+) hit points(?: \(([^)]*)\))? with an attack that does (\d+) (\w+) damage at initiative (\d+)$",
    )
    .unwrap()
});

#[derive(PuzzleSolver)]
#[puzzle(parts = 2)]
pub struct Solver;

impl PuzzleParser for Solver {
    type SharedData<'a> = Battle;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut armies: Vec<(Side, Vec<&str>)> = Vec::new();
        for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match line {
                "Immune System:" => armies.push((Side::ImmuneSystem, Vec::new())),
                "Infection:" => armies.push((Side::Infection, Vec::new())),
                _ => match armies.last_mut() {
                    Some((_, lines)) => lines.push(line),
                    None => return Err(ParseError::MissingData(format!("army header before {line:?}"))),
                },
            }
        }

        let groups: Vec<Group> = armies
            .into_iter()
            .flat_map(|(side, lines)| lenient_lines(&lines.join("\n"), |l| parse_group(side, l)))
            .collect();
        if groups.is_empty() {
            return Err(ParseError::MissingData("army groups".into()));
        }
        Ok(Battle::new(groups))
    }
}

fn parse_group(side: Side, line: &str) -> anyhow::Result<Group> {
    let caps = GROUP.captures(line).ok_or_else(|| anyhow!("not a group description"))?;

    let mut weaknesses = Vec::new();
    let mut immunities = Vec::new();
    if let Some(traits) = caps.get(3) {
        for clause in traits.as_str().split("; ") {
            let (list, kinds) = if let Some(kinds) = clause.strip_prefix("weak to ") {
                (&mut weaknesses, kinds)
            } else if let Some(kinds) = clause.strip_prefix("immune to ") {
                (&mut immunities, kinds)
            } else {
                bail!("unknown trait {clause:?}");
            };
            list.extend(kinds.split(", ").map(str::to_string));
        }
    }

    let hit_points = caps[2].parse()?;
    if hit_points == 0 {
        bail!("a group needs at least one hit point");
    }

    Ok(Group {
        side,
        units: caps[1].parse()?,
        hit_points,
        attack_damage: caps[4].parse()?,
        attack_type: caps[5].to_string(),
        initiative: caps[6].parse()?,
        weaknesses,
        immunities,
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let victory = shared.clone().fight().map_err(SolveError::failed)?;
        Ok(victory.remaining_units.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, victory) = minimal_boost(shared, Side::ImmuneSystem, MAX_BOOST)
            .ok_or_else(|| SolveError::failed(format!("no boost up to {MAX_BOOST} saves the reindeer")))?;
        Ok(victory.remaining_units.to_string())
    }
}
