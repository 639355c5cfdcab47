use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_files::Files;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use crate::config::{AppConfig, WeekLayout};
use crate::form::{export_timetables_to_csv, SubjectRequest};
use crate::schedule::{SectionTimetable, Shortfall, Subject};
use crate::state::{Phase, TimetableSession};

/// Shared server state. Every handler takes the session lock for the whole
/// action, so actions run one at a time.
pub struct AppState {
    pub session: Mutex<TimetableSession>,
    pub export_csv: Option<PathBuf>,
}

impl AppState {
    pub fn new(layout: WeekLayout, export_csv: Option<PathBuf>) -> Self {
        Self {
            session: Mutex::new(TimetableSession::new(layout)),
            export_csv,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.week.clone(),
            config.output.export_csv.as_ref().map(PathBuf::from),
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimetableSession>> {
        self.session
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("Session state is poisoned"))
    }
}

#[derive(Serialize)]
pub struct SubjectRow {
    index: usize,
    subject: String,
    section: String,
    hours_per_week: u32,
}

#[derive(Serialize)]
pub struct SubjectsResponse {
    added: Option<bool>,
    subjects: Vec<SubjectRow>,
}

#[derive(Serialize)]
pub struct EditResponse {
    refill: Option<SubjectRequest>,
    subjects: Vec<SubjectRow>,
}

#[derive(Serialize)]
pub struct TimetableRow {
    time: String,
    cells: Vec<Option<String>>,
}

#[derive(Serialize)]
pub struct TimetableView {
    section: String,
    rows: Vec<TimetableRow>,
    shortfalls: Vec<Shortfall>,
}

#[derive(Serialize)]
pub struct TimetablesResponse {
    phase: Phase,
    locked: bool,
    saved_at: Option<DateTime<Utc>>,
    days: Vec<String>,
    timetables: Vec<TimetableView>,
}

fn subject_rows(subjects: &[Subject]) -> Vec<SubjectRow> {
    subjects
        .iter()
        .enumerate()
        .map(|(index, s)| SubjectRow {
            index,
            subject: s.subject.clone(),
            section: s.section.clone(),
            hours_per_week: s.hours_per_week,
        })
        .collect()
}

fn timetable_view(timetable: &SectionTimetable, layout: &WeekLayout) -> TimetableView {
    let rows = timetable
        .grid
        .rows()
        .enumerate()
        .map(|(time_index, cells)| TimetableRow {
            time: layout.time_slots.get(time_index).cloned().unwrap_or_default(),
            cells: cells.to_vec(),
        })
        .collect();

    TimetableView {
        section: timetable.section.clone(),
        rows,
        shortfalls: timetable.shortfalls.clone(),
    }
}

fn timetables_response(session: &TimetableSession) -> TimetablesResponse {
    TimetablesResponse {
        phase: session.phase(),
        locked: session.is_locked(),
        saved_at: session.saved_at(),
        days: session.layout().days.clone(),
        timetables: session
            .timetables()
            .iter()
            .map(|t| timetable_view(t, session.layout()))
            .collect(),
    }
}

async fn list_subjects(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.lock()?;
    Ok(HttpResponse::Ok().json(SubjectsResponse {
        added: None,
        subjects: subject_rows(session.subjects()),
    }))
}

// Invalid submissions are not an error; the list just comes back unchanged
async fn add_subject(
    req: web::Json<SubjectRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.lock()?;
    let added = session.add_subject(&req);
    Ok(HttpResponse::Ok().json(SubjectsResponse {
        added: Some(added),
        subjects: subject_rows(session.subjects()),
    }))
}

async fn edit_subject(
    index: web::Path<usize>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.lock()?;
    let refill = session.edit_subject(index.into_inner());
    Ok(HttpResponse::Ok().json(EditResponse {
        refill,
        subjects: subject_rows(session.subjects()),
    }))
}

async fn delete_subject(
    index: web::Path<usize>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let mut session = state.lock()?;
    session.delete_subject(index.into_inner());
    Ok(HttpResponse::Ok().json(SubjectsResponse {
        added: None,
        subjects: subject_rows(session.subjects()),
    }))
}

async fn generate(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = state.lock()?;
    let mut rng = rand::thread_rng();

    let outcome = session.generate(&mut rng).map(|timetables| timetables.len());
    match outcome {
        Ok(_) => Ok(HttpResponse::Ok().json(timetables_response(&session))),
        Err(e) => {
            tracing::info!("Generate refused: {}", e);
            Ok(HttpResponse::Conflict().json(timetables_response(&session)))
        }
    }
}

async fn save(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut session = state.lock()?;
    let already_saved = session.is_locked();
    session.save();

    if let (false, Some(path)) = (already_saved, &state.export_csv) {
        if let Err(e) = export_timetables_to_csv(session.timetables(), session.layout(), path) {
            tracing::error!("Failed to export timetables to {}: {}", path.display(), e);
        }
    }

    Ok(HttpResponse::Ok().json(timetables_response(&session)))
}

async fn get_timetables(state: web::Data<AppState>) -> Result<HttpResponse> {
    let session = state.lock()?;
    Ok(HttpResponse::Ok().json(timetables_response(&session)))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Frontend assets, resolved against the crate root rather than the
/// working directory the server was started from
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Registers the page, static asset and API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(Files::new("/static", STATIC_DIR))
        .service(
            web::resource("/api/subjects")
                .route(web::get().to(list_subjects))
                .route(web::post().to(add_subject)),
        )
        .route("/api/subjects/{index}/edit", web::post().to(edit_subject))
        .route("/api/subjects/{index}", web::delete().to(delete_subject))
        .route("/api/generate", web::post().to(generate))
        .route("/api/save", web::post().to(save))
        .route("/api/timetables", web::get().to(get_timetables));
}

pub async fn start_server(config: AppConfig) -> std::io::Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let app_state = web::Data::new(AppState::from_config(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
