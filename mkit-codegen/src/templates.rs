//! Go source blueprints for the five artifacts of a service unit.
//!
//! Placeholders use `{{name}}` markers and are substituted by
//! [`crate::expand`]: `{{service}}` is the capitalized canonical name,
//! `{{receiver}}` the receiver type name, `{{var}}` the lowercase-first
//! variable name, and `{{module}}` the target project's Go module path.

/// Data-access layer: repository interface plus GORM-backed implementation.
pub const REPOSITORY: &str = r#"package repository

import "gorm.io/gorm"

type {{service}}Repository interface {
	// Define repository methods here
}

type {{var}}Repository struct {
	db *gorm.DB
}

func New{{service}}Repository(db *gorm.DB) {{service}}Repository {
	return &{{var}}Repository{db}
}
"#;

/// Business-logic layer wrapping the repository.
pub const SERVICE: &str = r#"package service

import "{{module}}/internal/repository"

type {{receiver}}Service struct {
	repo repository.{{service}}Repository
}

func New{{service}}Service(r repository.{{service}}Repository) *{{receiver}}Service {
	return &{{receiver}}Service{repo: r}
}
"#;

/// Request-handling layer with the five conventional CRUD routes.
pub const HANDLER: &str = r#"package handler

import (
	"{{module}}/internal/service"
	"github.com/gofiber/fiber/v2"
)

type {{receiver}}Handler struct {
	svc *service.{{service}}Service
}

func New{{service}}Handler(svc *service.{{service}}Service) *{{receiver}}Handler {
	return &{{receiver}}Handler{svc: svc}
}

func (h *{{receiver}}Handler) Register(router fiber.Router) {
	router.Get("/", h.list)
	router.Post("/", h.create)
	router.Get("/:id", h.get)
	router.Put("/:id", h.update)
	router.Delete("/:id", h.delete)
}

func (h *{{receiver}}Handler) list(c *fiber.Ctx) error {
	return c.SendStatus(fiber.StatusOK)
}
func (h *{{receiver}}Handler) create(c *fiber.Ctx) error {
	return c.SendStatus(fiber.StatusCreated)
}
func (h *{{receiver}}Handler) get(c *fiber.Ctx) error {
	return c.SendStatus(fiber.StatusOK)
}
func (h *{{receiver}}Handler) update(c *fiber.Ctx) error {
	return c.SendStatus(fiber.StatusOK)
}
func (h *{{receiver}}Handler) delete(c *fiber.Ctx) error {
	return c.SendStatus(fiber.StatusNoContent)
}
"#;

/// Data-transfer definition stub.
pub const DTO: &str = r#"package dto

// TODO: define DTOs for {{service}} operations
"#;

/// Unit-test stub for the DTO package.
pub const DTO_TEST: &str = r#"package dto_test

import "testing"

func Test{{service}}DTO(t *testing.T) {
	t.Log("TODO: write dto test")
}
"#;
