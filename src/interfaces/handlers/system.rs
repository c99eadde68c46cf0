use std::time::{Duration, Instant};

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use sysinfo::System;

use crate::{constants::START_TIME, AppState};

const CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone)]
struct HostInfo {
    os: String,
    kernel: String,
    hostname: String,
    cpu_count: usize,
    memory_total: String,
}

#[derive(Serialize, Clone)]
struct HealthReport {
    service: String,
    status: &'static str,
    database: &'static str,
    version: &'static str,
    uptime: String,
    started_at: String,
    checked_at: String,
    memory_usage: String,
    host: HostInfo,
}

static LAST_REPORT: Lazy<RwLock<Option<(Instant, HealthReport)>>> = Lazy::new(|| RwLock::new(None));

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

async fn collect_report(state: &AppState) -> HealthReport {
    let now = Utc::now();
    let uptime = now
        .signed_duration_since(*START_TIME)
        .to_std()
        .unwrap_or_default();

    let database_ok = match state.auth_handler.user_repo.check_connection().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            false
        }
    };

    let mut sys = System::new_all();
    sys.refresh_all();

    let memory_usage = sysinfo::get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or_else(
            || "Unknown".to_string(),
            |p| format!("{:.2} MB", megabytes(p.memory())),
        );

    HealthReport {
        service: state.config.name.clone(),
        status: if database_ok { "healthy" } else { "degraded" },
        database: if database_ok { "OK" } else { "Unavailable" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(Duration::from_secs(uptime.as_secs())).to_string(),
        started_at: START_TIME.to_rfc3339(),
        checked_at: now.to_rfc3339(),
        memory_usage,
        host: HostInfo {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            kernel: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
            memory_total: format!("{:.2} GB", megabytes(sys.total_memory()) / 1024.0),
        },
    }
}

/// Service health, recomputed at most every few seconds.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    if let Some((checked, report)) = LAST_REPORT.read().as_ref() {
        if checked.elapsed() < CACHE_TTL {
            return HttpResponse::Ok().json(report);
        }
    }

    let report = collect_report(&state).await;
    *LAST_REPORT.write() = Some((Instant::now(), report.clone()));

    HttpResponse::Ok().json(report)
}
