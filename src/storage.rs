use crate::models::Record;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save rows as CSV in the dataset's native column layout (header included).
pub fn save_csv<P: AsRef<Path>>(rows: &[&Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    if rows.is_empty() {
        wtr.write_record(Record::COLUMNS)?;
    }
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[&Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::models::Continent;
    use tempfile::tempdir;

    fn japan() -> Record {
        Record {
            country: "Japan".into(),
            continent: Continent::Asia,
            year: 1952,
            life_exp: 63.03,
            pop: 86_459_025.0,
            gdp_percap: 3216.956347,
            iso_alpha: "JPN".into(),
            iso_num: Some(392),
        }
    }

    #[test]
    fn csv_export_loads_back_as_dataset() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let rec = japan();
        save_csv(&[&rec], &csvp).unwrap();
        let text = std::fs::read_to_string(&csvp).unwrap();
        assert!(text.starts_with("country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num"));
        let ds = Dataset::load_csv(&csvp).unwrap();
        assert_eq!(ds.records(), &[rec]);
    }

    #[test]
    fn write_json_and_empty_csv() {
        let dir = tempdir().unwrap();
        let jsonp = dir.path().join("x.json");
        let csvp = dir.path().join("empty.csv");
        let rec = japan();
        save_json(&[&rec], &jsonp).unwrap();
        save_csv(&[], &csvp).unwrap();
        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&jsonp).unwrap()).unwrap();
        assert_eq!(v[0]["iso_alpha"], "JPN");
        assert_eq!(v[0]["lifeExp"], 63.03);
        assert_eq!(std::fs::read_to_string(&csvp).unwrap().lines().count(), 1);
    }
}
