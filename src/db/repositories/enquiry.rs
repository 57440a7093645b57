use crate::entities::{enquiry, prelude::*};
use crate::models::{Enquiry as StoredEnquiry, NewEnquiry};
use chrono::Utc;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct EnquiryRepository {
    conn: DatabaseConnection,
}

impl EnquiryRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, new: &NewEnquiry) -> Result<StoredEnquiry, DbErr> {
        let now = Utc::now();
        let model = enquiry::Model {
            id: Uuid::now_v7().to_string(),
            name: new.name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            company: new.company.clone(),
            service: new.service.clone(),
            message: new.message.clone(),
            consent: new.consent,
            source: new.source.clone(),
            created_at: now,
            updated_at: now,
        };

        let active_model = enquiry::ActiveModel {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            email: Set(model.email.clone()),
            phone: Set(model.phone.clone()),
            company: Set(model.company.clone()),
            service: Set(model.service.clone()),
            message: Set(model.message.clone()),
            consent: Set(model.consent),
            source: Set(model.source.clone()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };

        Enquiry::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(model.into())
    }

    /// Newest first. Ids are time-ordered, so they break timestamp ties.
    pub async fn recent(&self, limit: u64) -> Result<Vec<StoredEnquiry>, DbErr> {
        let rows = Enquiry::find()
            .order_by_desc(enquiry::Column::CreatedAt)
            .order_by_desc(enquiry::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        Enquiry::find().count(&self.conn).await
    }
}

impl From<enquiry::Model> for StoredEnquiry {
    fn from(model: enquiry::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            company: model.company,
            service: model.service,
            message: model.message,
            consent: model.consent,
            source: model.source,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
