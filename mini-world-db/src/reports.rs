//! Fixed analytical reports over the mini-world tables.
//!
//! Each report is one function returning typed rows. Ordering is done in SQL
//! where possible; ties fall back to names so output is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use rusqlite::{params, Connection};

use crate::operations::DbError;

/// Threat score of an intruder aliased as `i`:
/// `Intelligence² + Height − Weight / Height`.
///
/// There is no guard against a zero Height. SQLite yields NULL for division
/// by zero, so such intruders get a NULL score.
pub const THREAT_SCORE_SQL: &str =
    "(i.Intelligence * i.Intelligence + i.Height - CAST(i.Weight AS REAL) / i.Height)";

// ── Report catalogue ────────────────────────────────────────────────────────

/// Every report the console offers, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    ThreatAssessment,
    DefensiveReadiness,
    CombatEffectiveness,
    SpeciesByFoodItem,
    InventionDescriptionSearch,
    SpeciesPopulation,
    ColonyIntelligence,
    MostDangerousRegion,
    ThreatProfiles,
    SpeciesRecipes,
    HighThreatIntruders,
    RegionFoodimals,
    EffectiveInventions,
}

/// The single input a report may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportParameter {
    Keyword,
    SpeciesName,
    RegionName,
    ColonyId,
    Threshold,
}

impl ReportParameter {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Keyword => "Enter search keyword",
            Self::SpeciesName => "Enter species name",
            Self::RegionName => "Enter region name",
            Self::ColonyId => "Enter colony id",
            Self::Threshold => "Enter minimum threat score",
        }
    }

    /// Whether the input must parse as a number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::ColonyId | Self::Threshold)
    }
}

impl Report {
    pub const ALL: [Report; 13] = [
        Report::ThreatAssessment,
        Report::DefensiveReadiness,
        Report::CombatEffectiveness,
        Report::SpeciesByFoodItem,
        Report::InventionDescriptionSearch,
        Report::SpeciesPopulation,
        Report::ColonyIntelligence,
        Report::MostDangerousRegion,
        Report::ThreatProfiles,
        Report::SpeciesRecipes,
        Report::HighThreatIntruders,
        Report::RegionFoodimals,
        Report::EffectiveInventions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::ThreatAssessment => "Intruder Threat Assessment",
            Self::DefensiveReadiness => "Foodimal Defensive Readiness",
            Self::CombatEffectiveness => "Combat Effectiveness Analysis",
            Self::SpeciesByFoodItem => "Find Species by Food Item",
            Self::InventionDescriptionSearch => "Search Invention Descriptions",
            Self::SpeciesPopulation => "Count Foodimals of a Species",
            Self::ColonyIntelligence => "Average Intruder Intelligence by Colony",
            Self::MostDangerousRegion => "Most Dangerous Region",
            Self::ThreatProfiles => "Intruder Threat Profiles",
            Self::SpeciesRecipes => "Foodimal Species Recipes",
            Self::HighThreatIntruders => "High-Threat Intruders",
            Self::RegionFoodimals => "Foodimals in a Region",
            Self::EffectiveInventions => "Inventions Effective Against a Species",
        }
    }

    pub fn parameter(&self) -> Option<ReportParameter> {
        match self {
            Self::SpeciesByFoodItem | Self::InventionDescriptionSearch => {
                Some(ReportParameter::Keyword)
            }
            Self::SpeciesPopulation | Self::EffectiveInventions => {
                Some(ReportParameter::SpeciesName)
            }
            Self::ColonyIntelligence => Some(ReportParameter::ColonyId),
            Self::HighThreatIntruders => Some(ReportParameter::Threshold),
            Self::RegionFoodimals => Some(ReportParameter::RegionName),
            _ => None,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn like_pattern(keyword: &str) -> String {
    format!("%{}%", keyword.trim())
}

// ── Threat ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ThreatAssessmentRow {
    pub intruder_id: i64,
    pub name: String,
    pub region_name: String,
    pub intelligence: Option<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub threat_score: Option<f64>,
}

/// Threat score for every located intruder, highest first.
pub fn intruder_threat_assessment(
    conn: &Connection,
) -> Result<Vec<ThreatAssessmentRow>, DbError> {
    let sql = format!(
        "SELECT i.User_Id, i.Name, r.Region_Name, i.Intelligence, i.Height, i.Weight,
                {score} AS Threat_Score
         FROM INTRUDERS i
         JOIN ISLAND_REGIONS r ON i.Location_Id = r.Region_Id
         ORDER BY Threat_Score DESC, i.Name",
        score = THREAT_SCORE_SQL
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(ThreatAssessmentRow {
            intruder_id: row.get(0)?,
            name: row.get(1)?,
            region_name: row.get(2)?,
            intelligence: row.get(3)?,
            height: row.get(4)?,
            weight: row.get(5)?,
            threat_score: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreatProfileRow {
    pub name: String,
    pub intelligence: Option<i64>,
    pub threat_score: Option<f64>,
}

/// Name, intelligence, and threat score of every intruder, highest first.
pub fn intruder_threat_profiles(conn: &Connection) -> Result<Vec<ThreatProfileRow>, DbError> {
    let sql = format!(
        "SELECT i.Name, i.Intelligence, {score} AS Threat_Score
         FROM INTRUDERS i
         ORDER BY Threat_Score DESC, i.Name",
        score = THREAT_SCORE_SQL
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_profile)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Intruders whose threat score is strictly above `threshold`, highest first.
pub fn high_threat_intruders(
    conn: &Connection,
    threshold: f64,
) -> Result<Vec<ThreatProfileRow>, DbError> {
    let sql = format!(
        "SELECT i.Name, i.Intelligence, {score} AS Threat_Score
         FROM INTRUDERS i
         WHERE {score} > ?1
         ORDER BY Threat_Score DESC, i.Name",
        score = THREAT_SCORE_SQL
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![threshold], row_to_profile)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<ThreatProfileRow> {
    Ok(ThreatProfileRow {
        name: row.get(0)?,
        intelligence: row.get(1)?,
        threat_score: row.get(2)?,
    })
}

// ── Regions ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RegionThreatRow {
    pub region_id: i64,
    pub region_name: String,
    pub threat_to_intruders: Option<f64>,
}

/// Every region tied at the maximum threat value.
pub fn most_dangerous_regions(conn: &Connection) -> Result<Vec<RegionThreatRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT Region_Id, Region_Name, Threat_To_Intruders
         FROM ISLAND_REGIONS
         WHERE Threat_To_Intruders = (SELECT MAX(Threat_To_Intruders) FROM ISLAND_REGIONS)
         ORDER BY Region_Name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(RegionThreatRow {
            region_id: row.get(0)?,
            region_name: row.get(1)?,
            threat_to_intruders: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessRow {
    pub region_name: String,
    pub species_name: String,
    pub creature_count: i64,
}

/// Creature counts per (region, species).
pub fn foodimal_defensive_readiness(conn: &Connection) -> Result<Vec<ReadinessRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT r.Region_Name, s.Species_Name, COUNT(*) AS Creature_Count
         FROM INDIVIDUAL_FOODIMAL_CREATURES c
         JOIN ISLAND_REGIONS r ON c.Location_Id = r.Region_Id
         JOIN FOODIMALS_SPECIES s ON c.Species_Id = s.Species_Id
         GROUP BY r.Region_Id, s.Species_Id
         ORDER BY r.Region_Name ASC, Creature_Count DESC, s.Species_Name ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(ReadinessRow {
            region_name: row.get(0)?,
            species_name: row.get(1)?,
            creature_count: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionCreatureRow {
    pub creature_id: i64,
    pub species_name: String,
    pub populatory_species_id: Option<i64>,
}

/// Creatures in one region plus how many of each species live there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFoodimals {
    pub creatures: Vec<RegionCreatureRow>,
    /// `(species name, count)`, largest count first.
    pub distribution: Vec<(String, i64)>,
}

/// Creatures located in the region with exactly this name.
pub fn foodimals_in_region(
    conn: &Connection,
    region_name: &str,
) -> Result<RegionFoodimals, DbError> {
    let mut stmt = conn.prepare(
        "SELECT c.Creature_Id, s.Species_Name, c.Populatory_Species_Id
         FROM INDIVIDUAL_FOODIMAL_CREATURES c
         JOIN ISLAND_REGIONS r ON c.Location_Id = r.Region_Id
         JOIN FOODIMALS_SPECIES s ON c.Species_Id = s.Species_Id
         WHERE r.Region_Name = ?1
         ORDER BY s.Species_Name ASC, c.Creature_Id ASC",
    )?;
    let creatures = stmt
        .query_map(params![region_name], |row| {
            Ok(RegionCreatureRow {
                creature_id: row.get(0)?,
                species_name: row.get(1)?,
                populatory_species_id: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for creature in &creatures {
        *counts.entry(creature.species_name.as_str()).or_default() += 1;
    }
    let mut distribution: Vec<(String, i64)> = counts
        .into_iter()
        .map(|(name, n)| (name.to_string(), n))
        .collect();
    // Stable sort keeps the name order for equal counts.
    distribution.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(RegionFoodimals {
        creatures,
        distribution,
    })
}

// ── Combat ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CombatPairRow {
    pub intruder_id: i64,
    pub intruder_name: Option<String>,
    pub item_owner_id: i64,
    pub item_name: String,
    pub frequency: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventionUsageRow {
    pub item_owner_id: i64,
    pub item_name: String,
    pub usage_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatEffectiveness {
    pub pairs: Vec<CombatPairRow>,
    /// At most five inventions, most used first.
    pub top_inventions: Vec<InventionUsageRow>,
}

/// How often each intruder used each invention in combat.
pub fn combat_effectiveness(conn: &Connection) -> Result<CombatEffectiveness, DbError> {
    let mut stmt = conn.prepare(
        "SELECT ce.Intruder_Id, i.Name, ce.Item_Owner_Id, ce.Item_Name, COUNT(*) AS Frequency
         FROM COMBAT_EVENT ce
         LEFT JOIN INTRUDERS i ON ce.Intruder_Id = i.User_Id
         GROUP BY ce.Intruder_Id, ce.Item_Owner_Id, ce.Item_Name
         ORDER BY Frequency DESC, i.Name ASC, ce.Item_Name ASC",
    )?;
    let pairs = stmt
        .query_map([], |row| {
            Ok(CombatPairRow {
                intruder_id: row.get(0)?,
                intruder_name: row.get(1)?,
                item_owner_id: row.get(2)?,
                item_name: row.get(3)?,
                frequency: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT Item_Owner_Id, Item_Name, COUNT(*) AS Usage_Count
         FROM COMBAT_EVENT
         GROUP BY Item_Owner_Id, Item_Name
         ORDER BY Usage_Count DESC, Item_Name ASC
         LIMIT 5",
    )?;
    let top_inventions = stmt
        .query_map([], |row| {
            Ok(InventionUsageRow {
                item_owner_id: row.get(0)?,
                item_name: row.get(1)?,
                usage_count: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CombatEffectiveness {
        pairs,
        top_inventions,
    })
}

// ── Species ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesFoodRow {
    pub species_name: String,
    pub food_item: String,
}

/// Species with a food item containing `keyword`, ignoring case.
pub fn species_by_food_item(
    conn: &Connection,
    keyword: &str,
) -> Result<Vec<SpeciesFoodRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT s.Species_Name, f.Name
         FROM FOOD_ITEM f
         JOIN FOODIMALS_SPECIES s ON f.Species_Id = s.Species_Id
         WHERE LOWER(f.Name) LIKE LOWER(?1)
         ORDER BY s.Species_Name ASC, f.Name ASC",
    )?;
    let rows = stmt.query_map(params![like_pattern(keyword)], |row| {
        Ok(SpeciesFoodRow {
            species_name: row.get(0)?,
            food_item: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Number of creatures of the species with exactly this name.
///
/// Always a number: an unknown species or one without creatures counts 0.
pub fn count_foodimals_of_species(conn: &Connection, species_name: &str) -> Result<i64, DbError> {
    let count = conn.query_row(
        "SELECT COUNT(c.Creature_Id)
         FROM INDIVIDUAL_FOODIMAL_CREATURES c
         JOIN FOODIMALS_SPECIES s ON c.Species_Id = s.Species_Id
         WHERE s.Species_Name = ?1",
        params![species_name],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecipe {
    pub species_id: i64,
    pub species_name: String,
    pub animals: BTreeSet<String>,
    pub food_items: BTreeSet<String>,
}

/// Every species with the distinct animals and food items it is made of.
pub fn species_recipes(conn: &Connection) -> Result<Vec<SpeciesRecipe>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT Species_Id, Species_Name FROM FOODIMALS_SPECIES ORDER BY Species_Name, Species_Id",
    )?;
    let mut recipes = stmt
        .query_map([], |row| {
            Ok(SpeciesRecipe {
                species_id: row.get(0)?,
                species_name: row.get(1)?,
                animals: BTreeSet::new(),
                food_items: BTreeSet::new(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let animals = components_by_species(conn, "ANIMAL")?;
    let food_items = components_by_species(conn, "FOOD_ITEM")?;
    for recipe in &mut recipes {
        if let Some(set) = animals.get(&recipe.species_id) {
            recipe.animals = set.clone();
        }
        if let Some(set) = food_items.get(&recipe.species_id) {
            recipe.food_items = set.clone();
        }
    }
    Ok(recipes)
}

/// Distinct component names per species id for `ANIMAL` or `FOOD_ITEM`.
fn components_by_species(
    conn: &Connection,
    table: &str,
) -> Result<BTreeMap<i64, BTreeSet<String>>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT Species_Id, Name FROM {} WHERE Name IS NOT NULL",
        table
    ))?;
    let mut map: BTreeMap<i64, BTreeSet<String>> = BTreeMap::new();
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
    for row in rows {
        let (species_id, name) = row?;
        map.entry(species_id).or_default().insert(name);
    }
    Ok(map)
}

// ── Colonies ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ColonyIntelligence {
    pub colony_id: i64,
    pub intruder_count: i64,
    /// `None` when no intruder is linked to the colony.
    pub average_intelligence: Option<f64>,
}

/// Average intelligence of the distinct intruders with activity in a colony.
pub fn average_intelligence_by_colony(
    conn: &Connection,
    colony_id: i64,
) -> Result<ColonyIntelligence, DbError> {
    let (intruder_count, average_intelligence) = conn.query_row(
        "SELECT COUNT(*), AVG(i.Intelligence)
         FROM INTRUDERS i
         WHERE i.User_Id IN (
             SELECT sa.Intruder_Id FROM SUSPIOUS_ACTIVITIES sa WHERE sa.Colony_Id = ?1
         )",
        params![colony_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(ColonyIntelligence {
        colony_id,
        intruder_count,
        average_intelligence,
    })
}

// ── Inventions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct InventionDescriptionRow {
    pub item_owner_id: i64,
    pub owner_name: Option<String>,
    pub item_name: String,
    /// Matching descriptions for this (owner, item), ascending.
    pub descriptions: Vec<String>,
}

/// Inventions with a description containing `keyword`, ignoring case.
///
/// Several matching descriptions of the same (owner, item) collapse into one row.
pub fn search_invention_descriptions(
    conn: &Connection,
    keyword: &str,
) -> Result<Vec<InventionDescriptionRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT d.Item_Owner_Id, i.Name, d.Item_Name, d.Description
         FROM DESCRIPTIONS d
         LEFT JOIN INTRUDERS i ON d.Item_Owner_Id = i.User_Id
         WHERE LOWER(d.Description) LIKE LOWER(?1)
         ORDER BY d.Item_Name ASC, d.Item_Owner_Id ASC, d.Description ASC",
    )?;
    let rows = stmt.query_map(params![like_pattern(keyword)], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<String>>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut out: Vec<InventionDescriptionRow> = Vec::new();
    for row in rows {
        let (owner, owner_name, item, description) = row?;
        match out.last_mut() {
            Some(last) if last.item_owner_id == owner && last.item_name == item => {
                last.descriptions.push(description);
            }
            _ => out.push(InventionDescriptionRow {
                item_owner_id: owner,
                owner_name,
                item_name: item,
                descriptions: vec![description],
            }),
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveInventionRow {
    pub item_owner_id: i64,
    pub owner_name: Option<String>,
    pub item_name: String,
}

/// Inventions listed as a weakness of the species with exactly this name.
pub fn inventions_effective_against(
    conn: &Connection,
    species_name: &str,
) -> Result<Vec<EffectiveInventionRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT w.Item_Inventor_Id, i.Name, w.Item_Name
         FROM WEAKNESS w
         JOIN FOODIMALS_SPECIES s ON w.Species_Id = s.Species_Id
         LEFT JOIN INTRUDERS i ON w.Item_Inventor_Id = i.User_Id
         WHERE s.Species_Name = ?1
         ORDER BY w.Item_Name ASC, w.Item_Inventor_Id ASC",
    )?;
    let rows = stmt.query_map(params![species_name], |row| {
        Ok(EffectiveInventionRow {
            item_owner_id: row.get(0)?,
            owner_name: row.get(1)?,
            item_name: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
