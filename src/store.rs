//! SQLite store for hospitals, medicines and unanswered questions.
//!
//! A thin collaborator around the chat core: lookups for the two reference
//! tables and an insert-only log of questions the rule engine could not
//! answer. Reference data is imported from JSON files at startup when the
//! tables are empty.

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// A hospital, optionally under insurance contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub city: String,
    pub insurance_contract: bool,
}

/// A discounted medicine keyed by the ICD-10 code it treats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub icd10_code: String,
    pub icd10_name: String,
    #[serde(default)]
    pub tablet_id: Option<i64>,
    pub tablet_name_mon: String,
    pub tablet_name_sales: String,
    pub unit_price: f64,
    pub unit_discount: f64,
}

/// Cap on the initial medicine import; the source file can be large.
const MEDICINE_IMPORT_LIMIT: usize = 1000;

/// Cap on medicine search results.
const MEDICINE_SEARCH_LIMIT: usize = 30;

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS hospitals (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                insurance_contract INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS medicines (
                id INTEGER PRIMARY KEY,
                icd10_code TEXT NOT NULL,
                icd10_name TEXT NOT NULL,
                tablet_id INTEGER,
                tablet_name_mon TEXT NOT NULL,
                tablet_name_sales TEXT NOT NULL,
                unit_price REAL NOT NULL,
                unit_discount REAL NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS unanswered_questions (
                id INTEGER PRIMARY KEY,
                question TEXT NOT NULL,
                created_at TEXT NOT NULL,
                is_processed INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_medicines_icd10 ON medicines(icd10_code);
        "#,
        )
    }

    /// Import reference data from `<data_dir>/hospitals.json` and
    /// `<data_dir>/icd10_tablets.json` when the tables are empty. Import
    /// problems are logged and skipped; the service still starts.
    pub fn import_reference_data(&self, data_dir: &Path) {
        match self.count("hospitals") {
            Ok(0) => match self.import_hospitals(&data_dir.join("hospitals.json")) {
                Ok(n) => info!("Imported {n} hospital records"),
                Err(e) => warn!("Hospital import failed: {e}"),
            },
            Ok(n) => info!("Hospitals table already has {n} rows, skipping import"),
            Err(e) => warn!("Could not count hospitals: {e}"),
        }

        match self.count("medicines") {
            Ok(0) => match self.import_medicines(&data_dir.join("icd10_tablets.json")) {
                Ok(n) => info!("Imported {n} medicine records"),
                Err(e) => warn!("Medicine import failed: {e}"),
            },
            Ok(n) => info!("Medicines table already has {n} rows, skipping import"),
            Err(e) => warn!("Could not count medicines: {e}"),
        }
    }

    fn count(&self, table: &str) -> rusqlite::Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
    }

    fn import_hospitals(&self, path: &Path) -> Result<usize, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        let hospitals: Vec<Hospital> =
            serde_json::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))?;

        for hospital in &hospitals {
            self.insert_hospital(hospital).map_err(|e| e.to_string())?;
        }
        Ok(hospitals.len())
    }

    fn import_medicines(&self, path: &Path) -> Result<usize, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        let medicines: Vec<Medicine> =
            serde_json::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))?;

        let mut imported = 0;
        for medicine in medicines.iter().take(MEDICINE_IMPORT_LIMIT) {
            self.insert_medicine(medicine).map_err(|e| e.to_string())?;
            imported += 1;
        }
        Ok(imported)
    }

    pub fn insert_hospital(&self, hospital: &Hospital) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO hospitals (name, city, insurance_contract, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![hospital.name, hospital.city, hospital.insurance_contract, now()],
        )?;
        Ok(())
    }

    pub fn insert_medicine(&self, medicine: &Medicine) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO medicines (icd10_code, icd10_name, tablet_id, tablet_name_mon,
                                    tablet_name_sales, unit_price, unit_discount, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                medicine.icd10_code,
                medicine.icd10_name,
                medicine.tablet_id,
                medicine.tablet_name_mon,
                medicine.tablet_name_sales,
                medicine.unit_price,
                medicine.unit_discount,
                now()
            ],
        )?;
        Ok(())
    }

    /// All hospitals, import order.
    pub fn hospitals(&self) -> rusqlite::Result<Vec<Hospital>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT name, city, insurance_contract FROM hospitals ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Hospital {
                name: row.get(0)?,
                city: row.get(1)?,
                insurance_contract: row.get(2)?,
            })
        })?;
        rows.collect()
    }

    /// Medicines filtered by exact ICD-10 code and/or a case-insensitive
    /// substring of either tablet name, capped at 30 rows.
    pub fn search_medicines(
        &self,
        icd10_code: Option<&str>,
        tablet_name: Option<&str>,
    ) -> rusqlite::Result<Vec<Medicine>> {
        let conn = self.conn.lock().unwrap();

        let mut sql = String::from(
            "SELECT icd10_code, icd10_name, tablet_id, tablet_name_mon, tablet_name_sales,
                    unit_price, unit_discount
             FROM medicines",
        );
        let mut args: Vec<String> = Vec::new();

        if let Some(code) = icd10_code {
            sql.push_str(" WHERE icd10_code = ?");
            args.push(code.to_string());
        }

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), |row| {
            Ok(Medicine {
                icd10_code: row.get(0)?,
                icd10_name: row.get(1)?,
                tablet_id: row.get(2)?,
                tablet_name_mon: row.get(3)?,
                tablet_name_sales: row.get(4)?,
                unit_price: row.get(5)?,
                unit_discount: row.get(6)?,
            })
        })?;

        // SQLite LIKE only folds ASCII case, which would leave the Cyrillic
        // tablet names case-sensitive; the name match happens here instead.
        let needle = tablet_name.map(|name| name.to_lowercase());
        let mut medicines = Vec::new();
        for medicine in rows {
            let medicine = medicine?;
            if let Some(needle) = &needle {
                if !medicine.tablet_name_sales.to_lowercase().contains(needle)
                    && !medicine.tablet_name_mon.to_lowercase().contains(needle)
                {
                    continue;
                }
            }
            medicines.push(medicine);
            if medicines.len() == MEDICINE_SEARCH_LIMIT {
                break;
            }
        }
        Ok(medicines)
    }

    /// Record a question the rule engine could not answer.
    pub fn save_unanswered(&self, question: &str) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO unanswered_questions (question, created_at) VALUES (?1, ?2)",
            params![question, now()],
        )?;
        Ok(())
    }

    /// Number of logged unanswered questions.
    pub fn unanswered_count(&self) -> rusqlite::Result<i64> {
        self.count("unanswered_questions")
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
