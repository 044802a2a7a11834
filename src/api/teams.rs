//! Team roster endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{Source, SpeciesId, SpeciesRecord, Team, TeamId, UserId};

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

/// Request to rename a team
#[derive(Debug, Clone, Deserialize)]
pub struct RenameTeamRequest {
    pub name: String,
}

/// Request to add a member entry
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub species: SpeciesRecord,
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveMemberParams {
    #[serde(default, rename = "speciesId")]
    pub species_id: Option<String>,
}

/// Team response payload
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub members: Vec<SpeciesRecord>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            user_id: team.user_id().as_str().to_string(),
            members: team.members().to_vec(),
            created_at: team.created_at().to_rfc3339(),
            updated_at: team.updated_at().to_rfc3339(),
        }
    }
}

/// List teams response, tagged with the tier that served it
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub source: Source,
}

/// Create team response
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamResponse {
    pub team: TeamResponse,
    pub source: Source,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

/// The implicit single-user sentinel stands in when no user is given
fn user_from(param: Option<String>) -> UserId {
    match param {
        Some(id) if !id.trim().is_empty() => UserId::new(id),
        _ => UserId::default_user(),
    }
}

/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
    Query(params): Query<UserParams>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    let user = user_from(params.user_id);
    debug!(user = %user, "listing teams");

    let listed = state.roster.list_teams(&user).await?;

    Ok(Json(ListTeamsResponse {
        teams: listed.value.iter().map(TeamResponse::from).collect(),
        source: listed.source,
    }))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<CreateTeamResponse>, ApiError> {
    let user = user_from(request.user_id);
    debug!(user = %user, name = %request.name, "creating team");

    let created = state.roster.create_team(&request.name, &user).await?;

    Ok(Json(CreateTeamResponse {
        team: TeamResponse::from(&created.value),
        source: created.source,
    }))
}

/// PUT /api/teams/{team_id}
pub async fn rename_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(request): Json<RenameTeamRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    debug!(team_id = %team_id, "renaming team");

    state
        .roster
        .rename_team(&TeamId::new(team_id), &request.name)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/teams/{team_id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    debug!(team_id = %team_id, "deleting team");

    state.roster.delete_team(&TeamId::new(team_id)).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/teams/{team_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<UserParams>,
    Json(request): Json<AddMemberRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let species = request.species;

    if species.id() == 0 || species.name().trim().is_empty() {
        return Err(ApiError::bad_request("Valid species data is required"));
    }

    let user = user_from(params.user_id);
    debug!(team_id = %team_id, species_id = species.id(), "adding team member");

    state
        .roster
        .add_member(&user, &TeamId::new(team_id), species)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/teams/{team_id}/members
pub async fn remove_member(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(params): Query<RemoveMemberParams>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let raw = params.species_id.unwrap_or_default();
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ApiError::bad_request("Species ID is required"));
    }
    let species_id: SpeciesId = raw
        .parse()
        .map_err(|_| ApiError::bad_request("Species ID must be a number"))?;

    debug!(team_id = %team_id, species_id, "removing team member");

    state
        .roster
        .remove_member(&TeamId::new(team_id), species_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
