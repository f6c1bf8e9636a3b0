//! `orglab` demo binary
//!
//! Drives a full session against a scripted analysis service, and pokes at
//! a persisted store from the command line.

use anyhow::Context;
use async_trait::async_trait;
use clap::{value_parser, Arg, ArgAction, Command};
use futures::stream::{self, StreamExt};
use orglab_core::{AppState, Session, SessionConfig};
use orglab_gating::{RequestLedger, UnlockGate};
use orglab_model::{Kpi, NodeId, OrgNode};
use orglab_report::{
    AnalysisError, AnalysisService, AssemblyOutcome, CancelSignal, FragmentStream, ReportFragment,
};
use orglab_store::{JsonFileStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEMO_CHECKOUT_URL: &str = "https://pay.example.com/orglab-blueprint";
const DEMO_SECRET_TOKEN: &str = "ORGLAB_SUCCESS_2026";

/// Replays a canned fragment sequence with a per-item delay
#[derive(Debug)]
struct DemoService {
    delay: Duration,
    fail: bool,
}

#[async_trait]
impl AnalysisService for DemoService {
    async fn analyze(
        &self,
        tree: &OrgNode,
        _cancel: CancelSignal,
    ) -> Result<FragmentStream, AnalysisError> {
        tracing::info!(nodes = tree.node_count(), "starting demo analysis");
        let mut script: Vec<Result<ReportFragment, AnalysisError>> = vec![
            Ok(ReportFragment {
                current_bottlenecks: Some(vec![
                    "manual handoffs between teams".to_string(),
                    "single-threaded approvals at the top".to_string(),
                ]),
                ..ReportFragment::default()
            }),
            Ok(ReportFragment {
                ai_first_vision: Some("Automate the approval chain end to end.".to_string()),
                roi_estimate: Some("3.2x within two quarters".to_string()),
                ..ReportFragment::default()
            }),
            Ok(ReportFragment {
                executive_summary: Some(
                    "Flatten the hierarchy and automate the approval chain.".to_string(),
                ),
                ..ReportFragment::default()
            }),
        ];
        if self.fail {
            script.insert(2, Err(AnalysisError::Transport("connection reset".to_string())));
        }
        let delay = self.delay;
        Ok(stream::iter(script)
            .then(move |item| async move {
                tokio::time::sleep(delay).await;
                item
            })
            .boxed())
    }
}

fn demo_tree() -> OrgNode {
    let mut root = OrgNode::new("Leadership", "GENERAL DIRECTOR", "Strategic direction and vision.");
    root.id = NodeId::from("root-ceo");
    root.kpis.push(Kpi::new("Growth", 0.0, 100.0, "%"));
    root.children.push(OrgNode::new("Sales", "CRO", "Revenue generation."));
    root.children.push(OrgNode::new("Engineering", "CTO", "Product delivery."));
    root
}

fn open_store(path: Option<&String>) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    Ok(match path {
        Some(path) => Arc::new(JsonFileStore::open(path).context("opening store file")?),
        None => Arc::new(MemoryStore::new()),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Command::new("orglab")
        .version("0.1.0")
        .about("Org-chart strategy analysis core")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run a scripted analysis session end to end")
                .arg(
                    Arg::new("delay-ms")
                        .long("delay-ms")
                        .default_value("25")
                        .value_parser(value_parser!(u64))
                        .help("Delay between fragments, in milliseconds"),
                )
                .arg(
                    Arg::new("cancel-after")
                        .long("cancel-after")
                        .value_parser(value_parser!(usize))
                        .help("Cancel after this many merged fragments"),
                )
                .arg(
                    Arg::new("fail")
                        .long("fail")
                        .action(ArgAction::SetTrue)
                        .help("Inject a transport failure mid-stream"),
                )
                .arg(
                    Arg::new("store")
                        .long("store")
                        .help("Persist session state to this JSON file"),
                ),
        )
        .subcommand(
            Command::new("unlock")
                .about("Feed a payment-return query through the unlock gate")
                .arg(Arg::new("store").long("store").required(true).help("Store file"))
                .arg(Arg::new("query").long("query").required(true).help("URL query string"))
                .arg(
                    Arg::new("token")
                        .long("token")
                        .default_value(DEMO_SECRET_TOKEN)
                        .help("Expected shared secret"),
                ),
        )
        .subcommand(
            Command::new("requests")
                .about("List persisted dossier requests")
                .arg(Arg::new("store").long("store").required(true).help("Store file")),
        );

    match cli.get_matches().subcommand() {
        Some(("simulate", args)) => {
            let delay = Duration::from_millis(*args.get_one::<u64>("delay-ms").unwrap_or(&25));
            let cancel_after = args.get_one::<usize>("cancel-after").copied();
            let fail = args.get_flag("fail");
            let store = open_store(args.get_one::<String>("store"))?;

            let service = Arc::new(DemoService { delay, fail });
            let config = SessionConfig::new(DEMO_CHECKOUT_URL, DEMO_SECRET_TOKEN);
            let mut session = Session::new(config, store, service, demo_tree());

            session.goto(AppState::Editing)?;
            session.start_analysis()?;

            if let Some(limit) = cancel_after {
                let mut watch = session.report_watch().context("watch missing")?;
                // First change publishes the empty aggregate, every later
                // one is a merged fragment.
                let mut changes = 0usize;
                while changes <= limit && watch.changed().await.is_ok() {
                    changes += 1;
                }
                session.cancel_analysis();
            }

            let outcome = session.await_analysis().await;
            println!("outcome:  {outcome:?}");
            println!("state:    {:?}", session.state());
            println!("overlay:  {}", session.overlay_visible());
            match session.current_report() {
                Some(report) => println!("report:\n{}", serde_json::to_string_pretty(&report)?),
                None => println!("report:   discarded"),
            }

            if outcome == Some(AssemblyOutcome::Failed) {
                std::process::exit(1);
            }
        }
        Some(("unlock", args)) => {
            let store = open_store(args.get_one::<String>("store"))?;
            let query = args.get_one::<String>("query").unwrap();
            let token = args.get_one::<String>("token").unwrap();

            let gate = UnlockGate::new(token.clone());
            let outcome = gate.process_return(store.as_ref(), query);
            println!("unlocked this load: {}", outcome.unlocked);
            println!("pending tree:       {}", outcome.restored_tree.is_some());
            println!("profile unlocked:   {}", gate.is_unlocked(store.as_ref()));

            if !outcome.unlocked {
                std::process::exit(1);
            }
        }
        Some(("requests", args)) => {
            let store = open_store(args.get_one::<String>("store"))?;
            let ledger = RequestLedger::new(store);
            let requests = ledger.list();
            if requests.is_empty() {
                println!("no requests");
            }
            for req in requests {
                println!(
                    "{}  code={}  status={:?}  {} <{}> / {}",
                    req.id, req.access_code, req.status, req.user_name, req.user_email,
                    req.company_name
                );
            }
        }
        _ => {}
    }

    Ok(())
}
