//! Initial database migration.
//!
//! Creates the catalog, fiscal year, budget and bill workflow tables with
//! their indexes and the `updated_at` trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CATALOG
        // ============================================================
        db.execute_unprepared(OBJECT_CODE_LEVELS_SQL).await?;
        db.execute_unprepared(OBJECT_CODES_SQL).await?;

        // ============================================================
        // PART 2: FISCAL YEARS
        // ============================================================
        db.execute_unprepared(FISCAL_YEARS_SQL).await?;

        // ============================================================
        // PART 3: BUDGET LEDGER
        // ============================================================
        db.execute_unprepared(BUDGET_ENTRIES_SQL).await?;
        db.execute_unprepared(EXPENSE_HISTORIES_SQL).await?;

        // ============================================================
        // PART 4: BILL WORKFLOW
        // ============================================================
        db.execute_unprepared(CONTINGENT_BILLS_SQL).await?;
        db.execute_unprepared(SCHEDULE_OF_PAYMENTS_SQL).await?;
        db.execute_unprepared(ASAAN_CHEQUES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const OBJECT_CODE_LEVELS_SQL: &str = r"
CREATE TABLE object_code_levels (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    parent_id UUID REFERENCES object_code_levels(id) ON DELETE SET NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_object_code_levels_parent ON object_code_levels(parent_id) WHERE is_active;
";

const OBJECT_CODES_SQL: &str = r"
CREATE TABLE object_codes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(20) NOT NULL UNIQUE,
    head_of_account VARCHAR(255) NOT NULL,
    level_id UUID REFERENCES object_code_levels(id) ON DELETE SET NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_object_codes_level ON object_codes(level_id) WHERE is_active;
";

const FISCAL_YEARS_SQL: &str = r"
CREATE TABLE fiscal_years (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(50) NOT NULL UNIQUE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    is_current BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_fiscal_year_dates CHECK (end_date > start_date)
);

-- At most one current year
CREATE UNIQUE INDEX idx_fiscal_years_current ON fiscal_years(is_current) WHERE is_current;
";

const BUDGET_ENTRIES_SQL: &str = r"
CREATE TABLE budget_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    object_code_id UUID NOT NULL REFERENCES object_codes(id) ON DELETE RESTRICT,
    fiscal_year_id UUID NOT NULL REFERENCES fiscal_years(id) ON DELETE RESTRICT,

    -- Entered fields
    aaa_total_allocation NUMERIC(18, 2) NOT NULL DEFAULT 0,
    first_release NUMERIC(18, 2) NOT NULL DEFAULT 0,
    second_release NUMERIC(18, 2) NOT NULL DEFAULT 0,
    third_release NUMERIC(18, 2) NOT NULL DEFAULT 0,
    fourth_release NUMERIC(18, 2) NOT NULL DEFAULT 0,
    supplementary_budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    additional_surrender NUMERIC(18, 2) NOT NULL DEFAULT 0,
    excess_reallocation NUMERIC(18, 2) NOT NULL DEFAULT 0,
    aaa_re_app NUMERIC(18, 2) NOT NULL DEFAULT 0,
    budget_withheld_lapse NUMERIC(18, 2) NOT NULL DEFAULT 0,
    aaa_expenditure NUMERIC(18, 2) NOT NULL DEFAULT 0,
    development_allocated NUMERIC(18, 2) NOT NULL DEFAULT 0,
    development_re_app NUMERIC(18, 2) NOT NULL DEFAULT 0,
    development_expenditure NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pla_allocated NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pla_re_app NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pla_expenditure NUMERIC(18, 2) NOT NULL DEFAULT 0,
    uhi_allocated NUMERIC(18, 2) NOT NULL DEFAULT 0,
    uhi_re_app NUMERIC(18, 2) NOT NULL DEFAULT 0,
    uhi_expenditure NUMERIC(18, 2) NOT NULL DEFAULT 0,

    -- Derived fields, recomputed before every write
    sum_of_released NUMERIC(18, 2) NOT NULL DEFAULT 0,
    total_aaa_budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    aaa_remaining NUMERIC(18, 2) NOT NULL DEFAULT 0,
    development_total NUMERIC(18, 2) NOT NULL DEFAULT 0,
    development_remaining NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pla_total NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pla_remaining NUMERIC(18, 2) NOT NULL DEFAULT 0,
    uhi_total NUMERIC(18, 2) NOT NULL DEFAULT 0,
    uhi_remaining NUMERIC(18, 2) NOT NULL DEFAULT 0,
    consolidated_total_budget NUMERIC(18, 2) NOT NULL DEFAULT 0,
    consolidated_total_expenditure NUMERIC(18, 2) NOT NULL DEFAULT 0,
    consolidated_remaining NUMERIC(18, 2) NOT NULL DEFAULT 0,

    version INTEGER NOT NULL DEFAULT 1,
    created_by UUID,
    updated_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_budget_entries_code_year UNIQUE (object_code_id, fiscal_year_id)
);

CREATE INDEX idx_budget_entries_year ON budget_entries(fiscal_year_id);
";

const EXPENSE_HISTORIES_SQL: &str = r"
CREATE TABLE expense_histories (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    budget_entry_id UUID NOT NULL REFERENCES budget_entries(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    amount NUMERIC(18, 2) NOT NULL,
    category VARCHAR(3) NOT NULL,
    description TEXT,
    expense_date DATE NOT NULL,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_category CHECK (category IN ('AAA', 'DEV', 'PLA', 'UHI'))
);

CREATE INDEX idx_expense_histories_entry ON expense_histories(budget_entry_id, created_at);
";

const CONTINGENT_BILLS_SQL: &str = r"
CREATE TABLE contingent_bills (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bill_number VARCHAR(50) NOT NULL UNIQUE,
    supplier_name VARCHAR(255) NOT NULL,
    tender_reference TEXT,
    description TEXT,
    bill_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    taxes_duties NUMERIC(18, 2) NOT NULL DEFAULT 0,
    net_payment NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status TEXT,
    workflow_status VARCHAR(50) NOT NULL DEFAULT 'Draft',
    is_draft BOOLEAN NOT NULL DEFAULT true,
    disallowance_reason TEXT,

    account_officer_approved BOOLEAN NOT NULL DEFAULT false,
    account_officer_approved_at TIMESTAMPTZ,
    account_officer_remarks TEXT,
    account_officer_approved_by UUID,
    accountant_approved BOOLEAN NOT NULL DEFAULT false,
    accountant_approved_at TIMESTAMPTZ,
    accountant_remarks TEXT,
    accountant_approved_by UUID,
    audit_officer_approved BOOLEAN NOT NULL DEFAULT false,
    audit_officer_approved_at TIMESTAMPTZ,
    audit_officer_remarks TEXT,
    audit_officer_approved_by UUID,
    senior_budget_officer_approved BOOLEAN NOT NULL DEFAULT false,
    senior_budget_officer_approved_at TIMESTAMPTZ,
    senior_budget_officer_remarks TEXT,
    senior_budget_officer_approved_by UUID,
    director_finance_approved BOOLEAN NOT NULL DEFAULT false,
    director_finance_approved_at TIMESTAMPTZ,
    director_finance_remarks TEXT,
    director_finance_approved_by UUID,
    executive_director_approved BOOLEAN NOT NULL DEFAULT false,
    executive_director_approved_at TIMESTAMPTZ,
    executive_director_remarks TEXT,
    executive_director_approved_by UUID,

    object_code_id UUID REFERENCES object_codes(id) ON DELETE SET NULL,
    fiscal_year_id UUID REFERENCES fiscal_years(id) ON DELETE SET NULL,
    version INTEGER NOT NULL DEFAULT 1,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contingent_bills_status ON contingent_bills(workflow_status);
";

const SCHEDULE_OF_PAYMENTS_SQL: &str = r"
CREATE TABLE schedule_of_payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    contingent_bill_id UUID NOT NULL REFERENCES contingent_bills(id) ON DELETE CASCADE,
    payee_name VARCHAR(255) NOT NULL,
    description TEXT,
    gross_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    stamp_duty NUMERIC(18, 2) NOT NULL DEFAULT 0,
    income_tax NUMERIC(18, 2) NOT NULL DEFAULT 0,
    gst NUMERIC(18, 2) NOT NULL DEFAULT 0,
    pst NUMERIC(18, 2) NOT NULL DEFAULT 0,
    net_amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    status TEXT,

    accountant_approved BOOLEAN NOT NULL DEFAULT false,
    accountant_approved_at TIMESTAMPTZ,
    accountant_remarks TEXT,
    accountant_approved_by UUID,
    budget_officer_approved BOOLEAN NOT NULL DEFAULT false,
    budget_officer_approved_at TIMESTAMPTZ,
    budget_officer_remarks TEXT,
    budget_officer_approved_by UUID,
    audit_officer_approved BOOLEAN NOT NULL DEFAULT false,
    audit_officer_approved_at TIMESTAMPTZ,
    audit_officer_remarks TEXT,
    audit_officer_approved_by UUID,
    accounts_officer_approved BOOLEAN NOT NULL DEFAULT false,
    accounts_officer_approved_at TIMESTAMPTZ,
    accounts_officer_remarks TEXT,
    accounts_officer_approved_by UUID,
    director_finance_approved BOOLEAN NOT NULL DEFAULT false,
    director_finance_approved_at TIMESTAMPTZ,
    director_finance_remarks TEXT,
    director_finance_approved_by UUID,
    executive_director_approved BOOLEAN NOT NULL DEFAULT false,
    executive_director_approved_at TIMESTAMPTZ,
    executive_director_remarks TEXT,
    executive_director_approved_by UUID,

    version INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_schedule_of_payments_bill ON schedule_of_payments(contingent_bill_id);
";

const ASAAN_CHEQUES_SQL: &str = r"
CREATE TABLE asaan_cheques (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    schedule_of_payment_id UUID NOT NULL REFERENCES schedule_of_payments(id) ON DELETE CASCADE,
    cheque_number VARCHAR(50) NOT NULL,
    amount NUMERIC(18, 2) NOT NULL DEFAULT 0,
    cheque_date DATE NOT NULL,
    status TEXT,

    director_finance_approved BOOLEAN NOT NULL DEFAULT false,
    director_finance_approved_at TIMESTAMPTZ,
    director_finance_remarks TEXT,
    director_finance_approved_by UUID,
    executive_director_approved BOOLEAN NOT NULL DEFAULT false,
    executive_director_approved_at TIMESTAMPTZ,
    executive_director_remarks TEXT,
    executive_director_approved_by UUID,

    bank_reference_number VARCHAR(100),
    forwarded_on DATE,
    version INTEGER NOT NULL DEFAULT 1,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_asaan_cheques_schedule ON asaan_cheques(schedule_of_payment_id);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = now();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_object_code_levels_updated_at BEFORE UPDATE ON object_code_levels
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_object_codes_updated_at BEFORE UPDATE ON object_codes
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_fiscal_years_updated_at BEFORE UPDATE ON fiscal_years
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_budget_entries_updated_at BEFORE UPDATE ON budget_entries
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_contingent_bills_updated_at BEFORE UPDATE ON contingent_bills
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_schedule_of_payments_updated_at BEFORE UPDATE ON schedule_of_payments
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
CREATE TRIGGER trg_asaan_cheques_updated_at BEFORE UPDATE ON asaan_cheques
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS asaan_cheques CASCADE;
DROP TABLE IF EXISTS schedule_of_payments CASCADE;
DROP TABLE IF EXISTS contingent_bills CASCADE;
DROP TABLE IF EXISTS expense_histories CASCADE;
DROP TABLE IF EXISTS budget_entries CASCADE;
DROP TABLE IF EXISTS fiscal_years CASCADE;
DROP TABLE IF EXISTS object_codes CASCADE;
DROP TABLE IF EXISTS object_code_levels CASCADE;
DROP FUNCTION IF EXISTS set_updated_at() CASCADE;
";
