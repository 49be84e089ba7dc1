use crate::infra::{default_evaluation_config, InMemoryApplicationRepository};
use clap::Args;
use credit_ai::config::AppConfig;
use credit_ai::confidentiality::{open_fields, seal_fields, AesGcmVault, ConfidentialityService};
use credit_ai::error::AppError;
use credit_ai::lending::applications::{
    ApplicantId, ApplicationSubmission, EvaluationEngine, HybridResult, IntakeGuard,
    LoanApplicationService,
};
use std::collections::BTreeMap;
use std::sync::Arc;

const DEMO_APPLICANT: &str = "demo-applicant";
const DEMO_PASSPHRASE: &str = "demo-passphrase";

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Requested loan principal
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// CIBIL score (300-900)
    #[arg(long)]
    pub(crate) cibil_score: i64,
    /// Years in current employment
    #[arg(long)]
    pub(crate) employment_years: f64,
    /// Existing monthly EMI obligations
    #[arg(long)]
    pub(crate) existing_loans: f64,
    /// Applicant identifier recorded on the submission
    #[arg(long, default_value = "cli")]
    pub(crate) applicant_id: String,
    /// Print the full decision as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the personal-data encryption portion of the demo.
    #[arg(long)]
    pub(crate) skip_confidentiality: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let submission = ApplicationSubmission {
        applicant_id: ApplicantId(args.applicant_id),
        income: args.income,
        loan_amount: args.loan_amount,
        cibil_score: args.cibil_score,
        employment_years: args.employment_years,
        existing_loans: args.existing_loans,
    };

    let application = IntakeGuard.application_from_submission(&submission)?;
    let result = EvaluationEngine::new(default_evaluation_config()).evaluate(&application);

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Decision payload unavailable: {err}"),
        }
    } else {
        render_result(&result);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Hybrid credit decision demo");

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = LoanApplicationService::new(repository, default_evaluation_config());

    for (title, submission) in demo_scenarios() {
        println!("\n== {title} ==");
        match service.submit(submission) {
            Ok(record) => {
                println!(
                    "Application {} received {}",
                    record.application_id.0,
                    record.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                render_result(&record.result);
            }
            Err(err) => println!("  Submission rejected: {err}"),
        }
    }

    match service.history(&ApplicantId(DEMO_APPLICANT.to_string())) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            match serde_json::to_string_pretty(&views) {
                Ok(json) => println!("\nApplicant history (newest first):\n{json}"),
                Err(err) => println!("\nApplicant history unavailable: {err}"),
            }
        }
        Err(err) => println!("\nApplicant history unavailable: {err}"),
    }

    if args.skip_confidentiality {
        return Ok(());
    }

    run_confidentiality_demo()
}

fn run_confidentiality_demo() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let vault = AesGcmVault::new(config.vault.kdf_iterations);

    println!(
        "\nPersonal data vault ({} KDF iterations)",
        vault.iterations()
    );

    let fields = BTreeMap::from([
        ("aadhaar".to_string(), "1234 5678 9012".to_string()),
        ("pan".to_string(), "ABCDE1234F".to_string()),
        ("phone".to_string(), "+91 98765 43210".to_string()),
    ]);

    let sealed = seal_fields(&vault, &fields, DEMO_PASSPHRASE)?;
    for (name, field) in &sealed {
        let preview: String = field.ciphertext.chars().take(24).collect();
        println!("- {name}: {preview}... (iv {}, salt {})", field.iv, field.salt);
    }

    let opened = open_fields(&vault, &sealed, DEMO_PASSPHRASE);
    let intact = opened == fields;
    println!("Round trip with the right passphrase intact: {intact}");

    let rejected = open_fields(&vault, &sealed, "wrong-passphrase");
    for (name, value) in &rejected {
        println!("- {name} with wrong passphrase: {value}");
    }

    let digest = vault.hash_password("loan-officer")?;
    println!(
        "Officer password verifies: {} | wrong password verifies: {}",
        vault.verify_password("loan-officer", &digest),
        vault.verify_password("loan-0fficer", &digest)
    );

    Ok(())
}

fn demo_scenarios() -> Vec<(&'static str, ApplicationSubmission)> {
    let submission = |income, loan_amount, cibil_score, employment_years, existing_loans| {
        ApplicationSubmission {
            applicant_id: ApplicantId(DEMO_APPLICANT.to_string()),
            income,
            loan_amount,
            cibil_score,
            employment_years,
            existing_loans,
        }
    };

    vec![
        (
            "Salaried applicant, good credit",
            submission(50_000.0, 500_000.0, 750, 3.5, 10_000.0),
        ),
        (
            "Stretched budget, fair credit",
            submission(30_000.0, 300_000.0, 600, 2.0, 20_000.0),
        ),
        (
            "Excellent credit, oversized loan",
            submission(50_000.0, 4_000_000.0, 780, 6.0, 5_000.0),
        ),
        (
            "Exactly on the policy limits",
            submission(10_000.0, 120_000.0, 650, 1.0, 5_900.0),
        ),
    ]
}

fn render_result(result: &HybridResult) {
    let decision = if result.approved {
        "APPROVED"
    } else {
        "REJECTED"
    };
    println!(
        "Decision: {decision} | hybrid score {}/100",
        result.display_score()
    );

    for entry in &result.breakdown {
        println!(
            "  - {} [{}%]: {} ({})",
            entry.technique.label(),
            entry.weight,
            entry.score,
            entry.rationale
        );
    }

    let metrics = &result.details.metrics_display;
    println!(
        "  Metrics: DTI {} | loan-to-income {} | new EMI {}",
        metrics.dti_ratio, metrics.loan_to_income_ratio, metrics.monthly_emi
    );
    println!("  {}", result.explanation);
    for reason in &result.rejection_reasons {
        println!("    * {}", reason.detail());
    }
}
