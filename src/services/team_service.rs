// src/services/team_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::team::{Assistant, PartnerRef, Professional},
};

#[derive(Clone)]
pub struct TeamService {
    repo: TeamRepository,
}

impl TeamService {
    pub fn new(repo: TeamRepository) -> Self {
        Self { repo }
    }

    pub async fn create_professional(
        &self,
        full_name: &str,
        commission_pct: Decimal,
        partner: Option<PartnerRef>,
    ) -> Result<Professional, AppError> {
        // O vínculo precisa apontar para alguém que existe; depois disso a
        // resolução em tempo de cálculo tolera referência quebrada.
        if let Some(partner) = partner {
            let exists = match partner {
                PartnerRef::Professional(id) => {
                    self.repo.find_professional(id).await?.is_some()
                }
                PartnerRef::Assistant(id) => self.repo.find_assistant(id).await?.is_some(),
            };
            if !exists {
                return Err(AppError::ResourceNotFound("Auxiliar".to_string()));
            }
        }

        self.repo
            .create_professional(full_name, commission_pct, partner)
            .await
    }

    pub async fn get_professional(&self, id: Uuid) -> Result<Professional, AppError> {
        self.repo
            .find_professional(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Profissional".to_string()))
    }

    pub async fn list_professionals(&self) -> Result<Vec<Professional>, AppError> {
        self.repo.list_professionals().await
    }

    pub async fn create_assistant(
        &self,
        full_name: &str,
        commission_pct: Decimal,
    ) -> Result<Assistant, AppError> {
        self.repo.create_assistant(full_name, commission_pct).await
    }

    pub async fn list_assistants(&self) -> Result<Vec<Assistant>, AppError> {
        self.repo.list_assistants().await
    }
}
