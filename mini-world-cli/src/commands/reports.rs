//! Report menu and rendering.

use mini_world_db::reports::{self, Report, ReportParameter};
use mini_world_db::DbError;

use crate::console::{parse_id, parse_threshold};
use crate::error::CliError;
use crate::logger::{log_blank, log_header, rule};
use crate::session::Session;
use crate::table::{fmt_opt, fmt_opt_f64, log_table};

/// Operator input for a report, already parsed.
enum Argument {
    None,
    Text(String),
    Id(i64),
    Number(f64),
}

/// Entry point for "Run reports".
pub(crate) fn run_reports(session: &mut Session) -> Result<(), CliError> {
    log_header("REPORTS");
    for (idx, report) in Report::ALL.iter().enumerate() {
        log::info!("{:>2}. {}", idx + 1, report.title());
    }
    log::info!("{}", rule());

    let idx = session
        .console
        .read_choice("\nEnter report number: ", Report::ALL.len())?;
    let report = Report::ALL[idx];
    let argument = read_argument(session, report.parameter())?;

    log_header(&report.title().to_uppercase());
    if let Err(e) = render(session, report, argument) {
        log::error!("Error running report: {}", e);
    }
    Ok(())
}

fn read_argument(
    session: &mut Session,
    parameter: Option<ReportParameter>,
) -> Result<Argument, CliError> {
    let Some(parameter) = parameter else {
        return Ok(Argument::None);
    };
    let input = session
        .console
        .read_line(&format!("{}: ", parameter.prompt()))?;
    if input.is_empty() {
        return Err(CliError::validation("A value is required for this report"));
    }
    if !parameter.is_numeric() {
        return Ok(Argument::Text(input));
    }
    Ok(match parameter {
        ReportParameter::Threshold => Argument::Number(parse_threshold(&input)?),
        _ => Argument::Id(parse_id(&input)?),
    })
}

fn render(session: &Session, report: Report, argument: Argument) -> Result<(), DbError> {
    let conn = &session.conn;
    let text = match &argument {
        Argument::Text(s) => s.as_str(),
        _ => "",
    };

    match report {
        Report::ThreatAssessment => {
            let rows = reports::intruder_threat_assessment(conn)?;
            table_or_empty(
                &["Intruder_Id", "Name", "Region", "Intelligence", "Height", "Weight", "Threat_Score"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.intruder_id.to_string(),
                            r.name.clone(),
                            r.region_name.clone(),
                            fmt_opt(r.intelligence),
                            fmt_opt(r.height),
                            fmt_opt(r.weight),
                            fmt_opt_f64(r.threat_score, 3),
                        ]
                    })
                    .collect(),
            );
        }
        Report::DefensiveReadiness => {
            let rows = reports::foodimal_defensive_readiness(conn)?;
            table_or_empty(
                &["Region", "Species", "Creature_Count"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.region_name.clone(),
                            r.species_name.clone(),
                            r.creature_count.to_string(),
                        ]
                    })
                    .collect(),
            );
        }
        Report::CombatEffectiveness => {
            let result = reports::combat_effectiveness(conn)?;
            if result.pairs.is_empty() {
                log::warn!("No data found.");
                return Ok(());
            }
            log::info!("Intruder / invention usage:");
            table_or_empty(
                &["Intruder", "Item_Owner_Id", "Item_Name", "Frequency"],
                result
                    .pairs
                    .iter()
                    .map(|r| {
                        vec![
                            fmt_opt(r.intruder_name.as_deref()),
                            r.item_owner_id.to_string(),
                            r.item_name.clone(),
                            r.frequency.to_string(),
                        ]
                    })
                    .collect(),
            );
            log_blank();
            log::info!("Top {} inventions overall:", result.top_inventions.len());
            table_or_empty(
                &["Item_Owner_Id", "Item_Name", "Usage_Count"],
                result
                    .top_inventions
                    .iter()
                    .map(|r| {
                        vec![
                            r.item_owner_id.to_string(),
                            r.item_name.clone(),
                            r.usage_count.to_string(),
                        ]
                    })
                    .collect(),
            );
        }
        Report::SpeciesByFoodItem => {
            let rows = reports::species_by_food_item(conn, text)?;
            table_or_empty(
                &["Species", "Food_Item"],
                rows.iter()
                    .map(|r| vec![r.species_name.clone(), r.food_item.clone()])
                    .collect(),
            );
        }
        Report::InventionDescriptionSearch => {
            let rows = reports::search_invention_descriptions(conn, text)?;
            table_or_empty(
                &["Item_Owner_Id", "Owner", "Item_Name", "Matches", "Descriptions"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.item_owner_id.to_string(),
                            fmt_opt(r.owner_name.as_deref()),
                            r.item_name.clone(),
                            r.descriptions.len().to_string(),
                            r.descriptions.join("; "),
                        ]
                    })
                    .collect(),
            );
        }
        Report::SpeciesPopulation => {
            let count = reports::count_foodimals_of_species(conn, text)?;
            log::info!("Species '{}' has {} foodimal(s).", text, count);
        }
        Report::ColonyIntelligence => {
            let Argument::Id(colony_id) = argument else {
                return Ok(());
            };
            let result = reports::average_intelligence_by_colony(conn, colony_id)?;
            match result.average_intelligence {
                Some(avg) => log::info!(
                    "Average intelligence of {} intruder(s) linked to colony {}: {:.2}",
                    result.intruder_count,
                    result.colony_id,
                    avg
                ),
                None => log::info!(
                    "No intruders linked to colony {}; average intelligence is NULL.",
                    result.colony_id
                ),
            }
        }
        Report::MostDangerousRegion => {
            let rows = reports::most_dangerous_regions(conn)?;
            table_or_empty(
                &["Region_Id", "Region_Name", "Threat_To_Intruders"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.region_id.to_string(),
                            r.region_name.clone(),
                            fmt_opt(r.threat_to_intruders),
                        ]
                    })
                    .collect(),
            );
        }
        Report::ThreatProfiles => {
            let rows = reports::intruder_threat_profiles(conn)?;
            profiles_table(&rows);
        }
        Report::HighThreatIntruders => {
            let Argument::Number(threshold) = argument else {
                return Ok(());
            };
            log::info!("Intruders with a threat score above {}:", threshold);
            let rows = reports::high_threat_intruders(conn, threshold)?;
            profiles_table(&rows);
        }
        Report::SpeciesRecipes => {
            let recipes = reports::species_recipes(conn)?;
            if recipes.is_empty() {
                log::warn!("No data found.");
            }
            for recipe in &recipes {
                log::info!("{} (Species_Id {})", recipe.species_name, recipe.species_id);
                log::info!("  Animals:    {}", join_or_none(recipe.animals.iter()));
                log::info!("  Food items: {}", join_or_none(recipe.food_items.iter()));
            }
        }
        Report::RegionFoodimals => {
            let result = reports::foodimals_in_region(conn, text)?;
            if result.creatures.is_empty() {
                log::warn!("No data found.");
                return Ok(());
            }
            table_or_empty(
                &["Creature_Id", "Species", "Populatory_Species_Id"],
                result
                    .creatures
                    .iter()
                    .map(|c| {
                        vec![
                            c.creature_id.to_string(),
                            c.species_name.clone(),
                            fmt_opt(c.populatory_species_id),
                        ]
                    })
                    .collect(),
            );
            log_blank();
            log::info!("Species distribution in {}:", text);
            table_or_empty(
                &["Species", "Count"],
                result
                    .distribution
                    .iter()
                    .map(|(name, n)| vec![name.clone(), n.to_string()])
                    .collect(),
            );
        }
        Report::EffectiveInventions => {
            let rows = reports::inventions_effective_against(conn, text)?;
            table_or_empty(
                &["Item_Owner_Id", "Owner", "Item_Name"],
                rows.iter()
                    .map(|r| {
                        vec![
                            r.item_owner_id.to_string(),
                            fmt_opt(r.owner_name.as_deref()),
                            r.item_name.clone(),
                        ]
                    })
                    .collect(),
            );
        }
    }
    Ok(())
}

fn profiles_table(rows: &[reports::ThreatProfileRow]) {
    table_or_empty(
        &["Name", "Intelligence", "Threat_Score"],
        rows.iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    fmt_opt(r.intelligence),
                    fmt_opt_f64(r.threat_score, 3),
                ]
            })
            .collect(),
    );
}

/// Log a table, or "No data found." when there are no rows.
fn table_or_empty(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        log::warn!("No data found.");
        return;
    }
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    log_table(&headers, &rows);
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined = items.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
