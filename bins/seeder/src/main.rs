//! Database seeder for local development and testing.
//!
//! Seeds an object code hierarchy, a current fiscal year and a few budget
//! entries, then prints a development bearer token for each officer role.
//! Running it twice is harmless: rows that already exist are skipped.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use finoffice_core::budget::{BudgetError, BudgetInputs, CreateBudgetEntryInput};
use finoffice_core::catalog::{CatalogError, LevelInput, ObjectCode, ObjectCodeInput};
use finoffice_core::fiscal::{CreateFiscalYearInput, FiscalError, FiscalYear};
use finoffice_core::workflow::OfficerRole;
use finoffice_db::{BudgetRepository, CatalogRepository, FiscalRepository};
use finoffice_shared::types::{ObjectCodeLevelId, UserId};
use finoffice_shared::{AppConfig, JwtConfig, JwtService};

/// Seed user id written to `created_by` (consistent for all seeds).
const SEED_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Department level, then (code, head of account, AAA first release) rows.
const OBJECT_CODES: &[(&str, &str, &[(&str, &str, i64)])] = &[
    (
        "EMP",
        "Employee Related Expenses",
        &[
            ("A01101", "Basic Pay of Officers", 1_200_000),
            ("A01151", "Basic Pay of Other Staff", 850_000),
            ("A01202", "House Rent Allowance", 300_000),
        ],
    ),
    (
        "OPS",
        "Operating Expenses",
        &[
            ("A03201", "Postage and Telegraph", 25_000),
            ("A03303", "Electricity", 400_000),
            ("A03901", "Stationery", 60_000),
        ],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = finoffice_db::connect(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    let actor = UserId::from_uuid(Uuid::parse_str(SEED_USER_ID)?);

    println!("Seeding object codes...");
    let codes = seed_object_codes(&db).await?;

    println!("Seeding fiscal year...");
    let year = seed_fiscal_year(&db).await?;

    println!("Seeding budget entries...");
    seed_budget_entries(&db, &codes, &year, actor).await?;

    println!("Development tokens:");
    print_tokens(&config, actor)?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_object_codes(db: &DatabaseConnection) -> anyhow::Result<Vec<(ObjectCode, i64)>> {
    let catalog = CatalogRepository::new(db.clone());
    let mut seeded = Vec::new();

    for (level_code, level_name, rows) in OBJECT_CODES {
        let level_id = seed_level(&catalog, level_code, level_name).await?;

        for (code, head, release) in *rows {
            let input = ObjectCodeInput {
                code: (*code).to_string(),
                head_of_account: (*head).to_string(),
                level_id: Some(level_id),
            };
            let object_code = match catalog.create_object_code(input).await {
                Ok(created) => {
                    println!("  Created object code {code}");
                    created
                }
                Err(CatalogError::DuplicateCode(_)) => {
                    println!("  Object code {code} already exists, skipping...");
                    let existing = catalog.list_object_codes(true).await?;
                    let Some(found) = existing.into_iter().find(|c| c.code == *code) else {
                        continue;
                    };
                    found
                }
                Err(e) => return Err(e.into()),
            };
            seeded.push((object_code, *release));
        }
    }

    Ok(seeded)
}

async fn seed_level(
    catalog: &CatalogRepository,
    code: &str,
    name: &str,
) -> anyhow::Result<ObjectCodeLevelId> {
    let levels = catalog.list_levels(true).await?;
    if let Some(level) = levels.iter().find(|l| l.code == code) {
        println!("  Level {code} already exists, skipping...");
        return Ok(level.id);
    }

    let level = catalog
        .create_level(LevelInput {
            code: code.to_string(),
            name: name.to_string(),
            parent_id: None,
        })
        .await?;
    println!("  Created level {code}: {name}");
    Ok(level.id)
}

/// Seeds the July-June fiscal year containing today and makes it current.
async fn seed_fiscal_year(db: &DatabaseConnection) -> anyhow::Result<FiscalYear> {
    let fiscal = FiscalRepository::new(db.clone());

    let today = Utc::now().date_naive();
    let start_year = if today.month() >= 7 {
        today.year()
    } else {
        today.year() - 1
    };
    let name = format!("{start_year}-{:02}", (start_year + 1) % 100);

    let input = CreateFiscalYearInput {
        name: name.clone(),
        start_date: date(start_year, 7, 1)?,
        end_date: date(start_year + 1, 6, 30)?,
    };

    let year = match fiscal.create(input).await {
        Ok(year) => {
            println!("  Created fiscal year {name}");
            year
        }
        Err(FiscalError::DuplicateName(_)) => {
            println!("  Fiscal year {name} already exists, skipping...");
            fiscal
                .list(true)
                .await?
                .into_iter()
                .find(|y| y.name == name)
                .ok_or_else(|| anyhow::anyhow!("fiscal year {name} vanished"))?
        }
        Err(e) => return Err(e.into()),
    };

    let year = fiscal.set_current(year.id).await?;
    println!("  Fiscal year {} is current", year.name);
    Ok(year)
}

async fn seed_budget_entries(
    db: &DatabaseConnection,
    codes: &[(ObjectCode, i64)],
    year: &FiscalYear,
    actor: UserId,
) -> anyhow::Result<()> {
    let budget = BudgetRepository::new(db.clone());

    for (code, release) in codes {
        let first_release = Decimal::from(*release);
        let inputs = BudgetInputs {
            aaa_total_allocation: first_release * Decimal::from(4),
            first_release,
            aaa_expenditure: (first_release / Decimal::from(3)).round_dp(2),
            ..Default::default()
        };
        let input = CreateBudgetEntryInput {
            object_code_id: code.id,
            fiscal_year_id: year.id,
            inputs,
            created_by: Some(actor),
        };

        match budget.create(input).await {
            Ok(view) => println!(
                "  Created entry for {} (AAA remaining {})",
                view.object_code, view.entry.totals.aaa_remaining
            ),
            Err(BudgetError::DuplicateEntry { .. }) => {
                println!("  Entry for {} already exists, skipping...", code.code);
            }
            Err(e) => eprintln!("Failed to create entry for {}: {e}", code.code),
        }
    }

    Ok(())
}

fn print_tokens(config: &AppConfig, actor: UserId) -> anyhow::Result<()> {
    let jwt = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_minutes: 24 * 60,
    });

    for role in [
        OfficerRole::Admin,
        OfficerRole::AccountOfficer,
        OfficerRole::Accountant,
        OfficerRole::DirectorFinance,
        OfficerRole::ExecutiveDirector,
    ] {
        let token = jwt.generate_access_token(actor.into_inner(), "Seed Officer", role.as_str())?;
        println!("  {:<20} {token}", role.as_str());
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("invalid date {year}-{month}-{day}"))
}
