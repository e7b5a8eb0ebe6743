// src/services/agenda_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgendaRepository, TeamRepository},
    models::agenda::Appointment,
};

#[derive(Clone)]
pub struct AgendaService {
    agenda_repo: AgendaRepository,
    team_repo: TeamRepository,
}

impl AgendaService {
    pub fn new(agenda_repo: AgendaRepository, team_repo: TeamRepository) -> Self {
        Self {
            agenda_repo,
            team_repo,
        }
    }

    /// Marca um horário. Conflito = mesmo profissional no mesmo instante
    /// (checagem de igualdade simples, sem lógica de intervalo) -> 409.
    pub async fn book(
        &self,
        client_cpf: &str,
        professional_id: Uuid,
        scheduled_at: DateTime<Utc>,
        service: Option<&str>,
    ) -> Result<Appointment, AppError> {
        self.team_repo
            .find_professional(professional_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Profissional".to_string()))?;

        self.agenda_repo
            .insert(client_cpf, professional_id, scheduled_at, service)
            .await
    }

    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        if end < start {
            return Err(AppError::BadRequest(
                "Data final anterior à inicial.".to_string(),
            ));
        }

        self.agenda_repo.list_between(start, end).await
    }
}
