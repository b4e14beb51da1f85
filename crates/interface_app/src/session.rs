//! Per-user session state
//!
//! Holds what the user has selected in the current session: the active
//! organization and project, layout, theme and how amounts are displayed.
//! The caller owns the context and passes it by reference to whatever needs
//! it; there is no global store.

use core_kernel::{OrganizationId, ProjectId};
use domain_currency::DisplayMode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Navigation layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Sidebar,
    Compact,
}

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Session selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    organization_id: Option<OrganizationId>,
    project_id: Option<ProjectId>,
    pub layout: LayoutMode,
    pub theme: Theme,
    pub display_mode: DisplayMode,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session inside an organization
    pub fn for_organization(organization_id: OrganizationId) -> Self {
        Self {
            organization_id: Some(organization_id),
            ..Self::default()
        }
    }

    pub fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the active organization or an error when none is selected
    pub fn require_organization(&self) -> Result<OrganizationId, AppError> {
        self.organization_id.ok_or(AppError::NoOrganization)
    }

    /// Switches organization
    ///
    /// The active project belongs to the previous organization and is
    /// cleared. Selecting the current organization again keeps it.
    pub fn select_organization(&mut self, organization_id: OrganizationId) {
        if self.organization_id != Some(organization_id) {
            self.project_id = None;
        }
        self.organization_id = Some(organization_id);
    }

    /// Selects a project within the active organization
    ///
    /// # Errors
    ///
    /// Returns `NoOrganization` when no organization is active.
    pub fn select_project(&mut self, project_id: ProjectId) -> Result<(), AppError> {
        self.require_organization()?;
        self.project_id = Some(project_id);
        Ok(())
    }

    /// Returns to the organization-wide view
    pub fn clear_project(&mut self) {
        self.project_id = None;
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Cycles light, dark, system
    pub fn cycle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        };
    }

    /// Ends the session, keeping layout and theme
    pub fn sign_out(&mut self) {
        self.organization_id = None;
        self.project_id = None;
        self.display_mode = DisplayMode::default();
    }
}
