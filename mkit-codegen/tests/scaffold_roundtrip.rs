//! End-to-end tests for the generate and remove engines against a
//! realistic target project fixture.

use chrono::{TimeDelta, Utc};
use mkit_codegen::{CONTAINER_FILE, ROUTES_FILE, RouteStatus, Scaffold, Teardown, TeardownError};
use mkit_core::{Overwrite, ServiceIdent};
use mkit_history::{HistoryStore, Error as HistoryError};
use tempfile::TempDir;

const GO_MOD: &str = "module example.com/app\n\ngo 1.22\n";

const CONTAINER: &str = r#"package service

import (
	"gorm.io/gorm"
)

type Container struct {
}

func NewContainer(db *gorm.DB) *Container {
	return &Container{
	}
}
"#;

const ROUTES: &str = r#"package routes

import (
	"os"

	"example.com/app/internal/handler"
	"example.com/app/internal/service"

	"github.com/gofiber/fiber/v2"
)

func Register(app *fiber.App, svc *service.Container) {
	api := app.Group(os.Getenv("API_ROUTE_VERSION"))

	handler.NewDefaultHandler().Register(api.Group("/"))
}
"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("go.mod"), GO_MOD).unwrap();
    std::fs::create_dir_all(temp.path().join("internal/service")).unwrap();
    std::fs::create_dir_all(temp.path().join("internal/routes")).unwrap();
    std::fs::write(temp.path().join(CONTAINER_FILE), CONTAINER).unwrap();
    std::fs::write(temp.path().join(ROUTES_FILE), ROUTES).unwrap();
    temp
}

fn scaffold(name: &str) -> Scaffold {
    Scaffold::new(
        ServiceIdent::parse(name).unwrap(),
        "example.com/app".to_string(),
    )
}

fn teardown(name: &str, force: bool) -> Teardown {
    Teardown::new(
        ServiceIdent::parse(name).unwrap(),
        "example.com/app".to_string(),
        force,
    )
}

fn read(temp: &TempDir, rel: &str) -> String {
    std::fs::read_to_string(temp.path().join(rel)).unwrap()
}

#[test]
fn test_generate_rsvp_writes_unit_and_wires_it() {
    let temp = project();

    let outcome = scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    assert_eq!(outcome.written.len(), 5);
    assert!(outcome.skipped.is_empty());
    assert!(matches!(outcome.routes, RouteStatus::Inserted));

    let repository = read(&temp, "internal/repository/rsvp_repository.go");
    assert!(repository.contains("type RsvpRepository interface {"));
    assert!(repository.contains("func NewRsvpRepository(db *gorm.DB) RsvpRepository {"));

    let service = read(&temp, "internal/service/rsvp_service.go");
    assert!(service.contains("func NewRsvpService(r repository.RsvpRepository) *RsvpService {"));

    let handler = read(&temp, "internal/handler/rsvp_handler.go");
    assert!(handler.contains("router.Delete(\"/:id\", h.delete)"));

    assert!(temp.path().join("internal/dto/rsvp.go").exists());
    assert!(temp.path().join("test/unit/dto/rsvp_input_test.go").exists());

    let container = read(&temp, CONTAINER_FILE);
    assert!(container.contains("\tRsvp *RsvpService"));
    assert!(container.contains("\t\tRsvp: NewRsvpService(repository.NewRsvpRepository(db)),"));
    assert!(container.contains("\"example.com/app/internal/repository\""));

    let routes = read(&temp, ROUTES_FILE);
    assert!(
        routes.contains("\thandler.NewRsvpHandler(svc.Rsvp).Register(api.Group(\"/rsvps\"))")
    );
}

#[test]
fn test_history_integrity_after_generate() {
    let temp = project();
    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    let raw = read(&temp, ".gen_history.json");
    assert!(raw.contains("\"rsvp\""));

    let (files, created_at) = HistoryStore::new(temp.path()).lookup("rsvp").unwrap();
    assert_eq!(files.len(), 5);
    assert_eq!(files[0], "internal/repository/rsvp_repository.go");
    assert_eq!(files[4], "test/unit/dto/rsvp_input_test.go");
    // lookup already parsed created_at as RFC 3339; sanity-check recency.
    assert!(Utc::now().signed_duration_since(created_at) < TimeDelta::seconds(30));
}

#[test]
fn test_generate_remove_round_trip_restores_files_byte_identical() {
    let temp = project();

    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();
    let outcome = teardown("rsvp", false).remove(temp.path()).unwrap();

    assert_eq!(outcome.deleted.len(), 5);
    assert!(outcome.failed.is_empty());
    assert!(outcome.warnings.is_empty());

    assert_eq!(read(&temp, CONTAINER_FILE), CONTAINER);
    assert_eq!(read(&temp, ROUTES_FILE), ROUTES);
    assert!(!temp.path().join("internal/repository/rsvp_repository.go").exists());
    assert!(matches!(
        HistoryStore::new(temp.path()).lookup("rsvp"),
        Err(HistoryError::NotFound { .. })
    ));
}

#[test]
fn test_double_generate_duplicates_field_but_not_import() {
    let temp = project();
    let scaffold = scaffold("rsvp");

    scaffold
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();
    let second = scaffold
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    // Second run skips all five existing files but still patches.
    assert!(second.written.is_empty());
    assert_eq!(second.skipped.len(), 5);
    assert!(matches!(second.routes, RouteStatus::AlreadyRegistered));

    let container = read(&temp, CONTAINER_FILE);
    assert_eq!(
        container
            .matches("example.com/app/internal/repository")
            .count(),
        1
    );
    assert_eq!(container.matches("\tRsvp *RsvpService").count(), 2);
    assert_eq!(
        container
            .matches("Rsvp: NewRsvpService(repository.NewRsvpRepository(db)),")
            .count(),
        2
    );

    let routes = read(&temp, ROUTES_FILE);
    assert_eq!(routes.matches("NewRsvpHandler").count(), 1);
}

#[test]
fn test_dry_run_preview_is_pure() {
    let temp = project();

    let previews = scaffold("rsvp").preview().unwrap();

    assert_eq!(previews.len(), 5);
    assert_eq!(previews[0].path, "internal/repository/rsvp_repository.go");
    assert!(previews[0].content.contains("type RsvpRepository interface {"));

    assert!(!temp.path().join("internal/repository").exists());
    assert_eq!(read(&temp, CONTAINER_FILE), CONTAINER);
    assert_eq!(read(&temp, ROUTES_FILE), ROUTES);
    assert!(!temp.path().join(".gen_history.json").exists());
}

#[test]
fn test_removing_one_unit_retains_shared_import() {
    let temp = project();
    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();
    scaffold("guest")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    teardown("rsvp", false).remove(temp.path()).unwrap();

    let container = read(&temp, CONTAINER_FILE);
    assert!(container.contains("\"example.com/app/internal/repository\""));
    assert!(container.contains("\tGuest *GuestService"));
    assert!(!container.contains("Rsvp"));

    // Removing the last unit strips the now-unused import.
    teardown("guest", false).remove(temp.path()).unwrap();
    assert_eq!(read(&temp, CONTAINER_FILE), CONTAINER);
}

#[test]
fn test_stale_entry_with_force_aborts_without_mutation() {
    let temp = project();
    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    // Age the entry past the freshness window.
    let store = HistoryStore::new(temp.path());
    let (files, _) = store.lookup("rsvp").unwrap();
    let stale = (Utc::now() - TimeDelta::hours(2)).to_rfc3339();
    store.record_at("rsvp", &stale, files).unwrap();

    let err = teardown("rsvp", true).remove(temp.path()).unwrap_err();
    assert!(matches!(err, TeardownError::Policy(_)));

    // No mutation: files, patches, and history all still in place.
    assert!(temp.path().join("internal/repository/rsvp_repository.go").exists());
    assert!(read(&temp, CONTAINER_FILE).contains("\tRsvp *RsvpService"));
    assert!(store.lookup("rsvp").is_ok());
}

#[test]
fn test_stale_entry_without_force_is_removed() {
    let temp = project();
    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    let store = HistoryStore::new(temp.path());
    let (files, _) = store.lookup("rsvp").unwrap();
    let stale = (Utc::now() - TimeDelta::hours(2)).to_rfc3339();
    store.record_at("rsvp", &stale, files).unwrap();

    let outcome = teardown("rsvp", false).remove(temp.path()).unwrap();

    assert_eq!(outcome.deleted.len(), 5);
    assert_eq!(read(&temp, CONTAINER_FILE), CONTAINER);
    assert!(matches!(
        store.lookup("rsvp"),
        Err(HistoryError::NotFound { .. })
    ));
}

#[test]
fn test_remove_unknown_unit_fails_before_mutation() {
    let temp = project();
    scaffold("guest")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    let err = teardown("rsvp", false).remove(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        TeardownError::History(HistoryError::NotFound { .. })
    ));
    assert!(read(&temp, CONTAINER_FILE).contains("\tGuest *GuestService"));
}

#[test]
fn test_remove_without_history_file_fails() {
    let temp = project();

    let err = teardown("rsvp", false).remove(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        TeardownError::History(HistoryError::Missing { .. })
    ));
}

#[test]
fn test_missing_generated_file_is_reported_not_fatal() {
    let temp = project();
    scaffold("rsvp")
        .generate(temp.path(), Overwrite::IfMissing)
        .unwrap();

    std::fs::remove_file(temp.path().join("internal/dto/rsvp.go")).unwrap();

    let outcome = teardown("rsvp", false).remove(temp.path()).unwrap();
    assert_eq!(outcome.deleted.len(), 4);
    assert_eq!(outcome.missing, ["internal/dto/rsvp.go"]);
    assert_eq!(read(&temp, CONTAINER_FILE), CONTAINER);
}

#[test]
fn test_force_overwrites_existing_artifacts() {
    let temp = project();
    std::fs::create_dir_all(temp.path().join("internal/repository")).unwrap();
    std::fs::write(
        temp.path().join("internal/repository/rsvp_repository.go"),
        "// stale hand-edited content\n",
    )
    .unwrap();

    let outcome = scaffold("rsvp")
        .generate(temp.path(), Overwrite::Always)
        .unwrap();

    assert_eq!(outcome.written.len(), 5);
    assert!(
        read(&temp, "internal/repository/rsvp_repository.go")
            .contains("type RsvpRepository interface {")
    );
}
