//! Rendering of route and stop listings.

use clap::ValueEnum;
use ratp_access_db::{Route, Stop};
use std::io::Write;

/// How listings are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per record
    Text,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

pub fn write_routes<W: Write>(out: &mut W, routes: &[Route], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "\nLignes\n----------")?;
            for route in routes {
                writeln!(out, "{}", route)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, routes)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["name", "origin", "destination", "stif_code", "accessibility"])?;
            for route in routes {
                writer.write_record([
                    route.name.as_str(),
                    route.origin.as_str(),
                    route.destination.as_str(),
                    route.stif_code.as_str(),
                    route.accessibility.join(",").as_str(),
                ])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn write_stops<W: Write>(
    out: &mut W,
    route_number: &str,
    stops: &[Stop],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "\nArrêts sur la ligne {}\n-----------", route_number)?;
            for stop in stops {
                writeln!(out, "{}", stop)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, stops)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["name", "direction", "route_stif_code", "accessibility"])?;
            for stop in stops {
                writer.write_record([
                    stop.name.as_str(),
                    stop.direction().as_str(),
                    stop.route_stif_code.as_str(),
                    stop.accessibility.join(",").as_str(),
                ])?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_54() -> Route {
        Route {
            id: 1,
            name: "54".to_string(),
            description: "1001000540001".to_string(),
            origin: "GABRIEL PERI-METRO".to_string(),
            destination: "PORTE DE VANVES".to_string(),
            stif_code: "1001000540001".to_string(),
            accessibility: vec![
                "Accessible en fauteuil roulant".to_string(),
                "Annonce sonore prochain arrêt".to_string(),
            ],
        }
    }

    fn stop(direction: &str) -> Stop {
        Stop {
            id: 3,
            name: "MAIRIE DE MALAKOFF".to_string(),
            description: None,
            direction: direction.to_string(),
            route_stif_code: "1001000540001".to_string(),
            accessibility: vec![],
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_text_routes() {
        let text = render(|out| write_routes(out, &[route_54()], OutputFormat::Text));
        assert!(text.starts_with("\nLignes\n----------\n"));
        assert!(text.contains(
            "Ligne 54, GABRIEL PERI-METRO -> PORTE DE VANVES, Accessibilité: \
             Accessible en fauteuil roulant,Annonce sonore prochain arrêt"
        ));
    }

    #[test]
    fn test_csv_routes_keep_labels_in_one_field() {
        let text = render(|out| write_routes(out, &[route_54()], OutputFormat::Csv));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,origin,destination,stif_code,accessibility"));
        assert_eq!(
            lines.next(),
            Some(
                "54,GABRIEL PERI-METRO,PORTE DE VANVES,1001000540001,\
                 \"Accessible en fauteuil roulant,Annonce sonore prochain arrêt\""
            )
        );
    }

    #[test]
    fn test_json_stops() {
        let text = render(|out| write_stops(out, "54", &[stop("A"), stop("R")], OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["direction"], "R");
    }

    #[test]
    fn test_text_stops() {
        let text = render(|out| write_stops(out, "54", &[stop("R")], OutputFormat::Text));
        assert!(text.contains("Arrêts sur la ligne 54"));
        assert!(text.contains("Arret MAIRIE DE MALAKOFF, Direction: Retour, Accessibilité: "));
    }

    #[test]
    fn test_csv_stops_use_direction_label() {
        let text = render(|out| write_stops(out, "54", &[stop("A")], OutputFormat::Csv));
        assert!(text.lines().nth(1).unwrap().starts_with("MAIRIE DE MALAKOFF,Aller,"));
    }
}
