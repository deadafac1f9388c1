use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};
use tracing::{debug, warn};

use crate::{entities::movie, error::AppResult, models::MovieInput};

/// Owns the `movie` table. Handlers get a clone through `AppState`.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new movie. SQLite assigns the id inside the INSERT itself.
    pub async fn create(&self, input: &MovieInput) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(input.title.clone()),
            year: Set(input.year),
            description: Set(input.description.clone()),
            rating: Set(input.rating),
            ranking: Set(input.ranking),
            review: Set(input.review.clone()),
            img_url: Set(input.img_url.clone()),
        };

        let created = model.insert(&self.db).await?;
        debug!(id = created.id, title = %created.title, "movie created");
        Ok(created)
    }

    pub async fn read(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Replaces every field of movie `id`. Returns `None` and changes nothing if it does not exist.
    pub async fn update(&self, id: i32, input: &MovieInput) -> AppResult<Option<movie::Model>> {
        let Some(existing) = self.read(id).await? else {
            warn!(id = id, "update skipped, movie not found");
            return Ok(None);
        };

        let mut model: movie::ActiveModel = existing.into();
        model.title = Set(input.title.clone());
        model.year = Set(input.year);
        model.description = Set(input.description.clone());
        model.rating = Set(input.rating);
        model.ranking = Set(input.ranking);
        model.review = Set(input.review.clone());
        model.img_url = Set(input.img_url.clone());

        let updated = model.update(&self.db).await?;
        debug!(id = id, "movie updated");
        Ok(Some(updated))
    }

    /// Removes movie `id` and returns what was removed, or `None` if it did not exist.
    pub async fn delete(&self, id: i32) -> AppResult<Option<movie::Model>> {
        let Some(existing) = self.read(id).await? else {
            warn!(id = id, "delete skipped, movie not found");
            return Ok(None);
        };

        movie::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(id = id, "movie deleted");
        Ok(Some(existing))
    }

    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }
}
