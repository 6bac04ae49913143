//! Case model
//!
//! A saved consultation snapshot: the patient profile, the exchange plan
//! and the intake log frozen at save time, plus precomputed intake totals
//! for listing without touching the JSON payloads.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::models::{DailyRecord, DietPlan, UserProfile};

/// Actual intake totals captured when the case was saved
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseSummary {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

/// Target/actual pair for one macro, used in case comparisons
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroPair {
    pub target: f64,
    pub actual: f64,
}

/// A saved case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Millisecond epoch timestamp as a string, doubles as the save time
    pub id: String,
    /// Save time, ms since epoch
    pub timestamp: i64,
    pub profile: UserProfile,
    pub plan: DietPlan,
    pub record: DailyRecord,
    pub summary: CaseSummary,
}

impl CaseRecord {
    /// Snapshot the current session state into a case.
    ///
    /// The profile, plan and record are cloned, so later session edits
    /// never reach back into a saved case.
    pub fn build(
        profile: &UserProfile,
        plan: &DietPlan,
        record: &DailyRecord,
        now_ms: i64,
    ) -> Self {
        let totals = record.macro_totals();
        Self {
            id: now_ms.to_string(),
            timestamp: now_ms,
            profile: profile.clone(),
            plan: plan.clone(),
            record: record.clone(),
            summary: CaseSummary {
                calories: totals.cal,
                protein: totals.p,
                fat: totals.f,
                carb: totals.c,
            },
        }
    }

    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let profile_json: String = row.get("profile_json")?;
        let plan_json: String = row.get("plan_json")?;
        let record_json: String = row.get("record_json")?;

        let parse = |field: &str, json: &str| -> rusqlite::Result<serde_json::Value> {
            serde_json::from_str(json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("{}: {}", field, e),
                    )),
                )
            })
        };

        let profile: UserProfile = serde_json::from_value(parse("profile_json", &profile_json)?)
            .unwrap_or_default();
        let plan: DietPlan =
            serde_json::from_value(parse("plan_json", &plan_json)?).unwrap_or_default();
        let record: DailyRecord =
            serde_json::from_value(parse("record_json", &record_json)?).unwrap_or_default();

        Ok(Self {
            id: row.get("id")?,
            timestamp: row.get("saved_at")?,
            profile,
            plan,
            record,
            summary: CaseSummary {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                fat: row.get("fat")?,
                carb: row.get("carb")?,
            },
        })
    }

    /// Insert this case
    pub fn insert(&self, conn: &Connection) -> DbResult<()> {
        let profile_json = serde_json::to_string(&self.profile)?;
        let plan_json = serde_json::to_string(&self.plan)?;
        let record_json = serde_json::to_string(&self.record)?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO cases
                (id, saved_at, profile_json, plan_json, record_json,
                 calories, protein, fat, carb)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                self.id,
                self.timestamp,
                profile_json,
                plan_json,
                record_json,
                self.summary.calories,
                self.summary.protein,
                self.summary.fat,
                self.summary.carb,
            ],
        )?;

        Ok(())
    }

    /// Get a case by ID
    pub fn get_by_id(conn: &Connection, id: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM cases WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(case) => Ok(Some(case)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all cases, newest first
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM cases ORDER BY saved_at DESC")?;
        let cases = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cases)
    }

    /// Delete a case
    pub fn delete(conn: &Connection, id: &str) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM cases WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Number of saved cases
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Flattened label/value pairs for the case summary sheet
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("姓名", self.profile.name.clone()),
            ("年齡", self.profile.age.to_string()),
            ("身高(cm)", format!("{:.1}", self.profile.height)),
            ("體重(kg)", format!("{:.1}", self.profile.weight)),
        ];
        for (label, pair) in self.macro_comparison() {
            let name = match label {
                "calories" => "熱量(kcal)",
                "protein" => "蛋白質(g)",
                "fat" => "脂肪(g)",
                _ => "醣類(g)",
            };
            rows.push((name, format!("{:.1} / {:.1}", pair.target, pair.actual)));
        }
        rows
    }

    /// Target vs actual for each macro, in calorie/protein/fat/carb order
    pub fn macro_comparison(&self) -> [(&'static str, MacroPair); 4] {
        [
            (
                "calories",
                MacroPair {
                    target: self.plan.target_calories,
                    actual: self.summary.calories,
                },
            ),
            (
                "protein",
                MacroPair {
                    target: self.plan.target_p,
                    actual: self.summary.protein,
                },
            ),
            (
                "fat",
                MacroPair {
                    target: self.plan.target_f,
                    actual: self.summary.fat,
                },
            ),
            (
                "carb",
                MacroPair {
                    target: self.plan.target_c,
                    actual: self.summary.carb,
                },
            ),
        ]
    }
}
