use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediflow_app::pages::{
    AppointmentsPage, BillingPage, DashboardPage, DoctorsPage, FeedbackPage, PatientsPage,
    PrescriptionsPage,
};
use mediflow_app::routes::ROUTES;
use mediflow_app::search::Debouncer;
use mediflow_app::AppState;
use mediflow_data::{Clock, LatencyProfile};

/// Render one page of the MediFlow clinic dashboard.
#[derive(Parser)]
#[command(name = "mediflow", version, about)]
struct Args {
    /// Page to render: dashboard, doctors, patients, appointments, billing,
    /// prescriptions or feedback.
    #[arg(default_value = "dashboard")]
    page: String,

    /// Filter the page's rows before rendering.
    #[arg(short, long, default_value = "")]
    search: String,

    /// Skip the simulated network latency.
    #[arg(long)]
    no_delay: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let latency = if args.no_delay {
        LatencyProfile::instant()
    } else {
        LatencyProfile::simulated()
    };
    let state = AppState::seeded(latency, Clock::System);

    // Deliver the search argument the way the UI would: through the
    // debounce, so only the most recently scheduled query fires.
    let search_sink = Arc::new(Mutex::new(String::new()));
    if !args.search.is_empty() {
        let mut debouncer = Debouncer::default();
        let sink = search_sink.clone();
        debouncer.input(args.search.clone(), move |query| {
            *sink.lock().expect("search sink") = query;
            std::future::ready(())
        });
        debouncer.flush().await;
    }
    let search = search_sink.lock().expect("search sink").clone();

    let rendered = match args.page.as_str() {
        "dashboard" => {
            let mut page = DashboardPage::new(state);
            page.load().await;
            page.render()
        }
        "doctors" => {
            let mut page = DoctorsPage::new(state.doctors.clone());
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        "patients" => {
            let mut page = PatientsPage::new(state.patients.clone(), state.clock);
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        "appointments" => {
            let mut page = AppointmentsPage::new(state.appointments.clone());
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        "billing" => {
            let mut page = BillingPage::new(state.bills.clone());
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        "prescriptions" => {
            let mut page = PrescriptionsPage::new(state.prescriptions.clone());
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        "feedback" => {
            let mut page = FeedbackPage::new(state.feedback.clone());
            page.load().await;
            page.set_query(search.clone());
            page.render()
        }
        other => {
            let known: Vec<&str> = ROUTES.iter().map(|route| route.id).collect();
            anyhow::bail!("unknown page '{other}'; known pages: {}", known.join(", "));
        }
    };

    println!("{rendered}");
    Ok(())
}
