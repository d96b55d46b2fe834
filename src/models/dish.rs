//! Menu dishes

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::dish;
use crate::{DbConn, Error};

/// A single dish on the menu
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = dish)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dish {
	pub id:           i32,
	pub name:         String,
	pub description:  Option<String>,
	pub price_cents:  i32,
	pub category:     String,
	pub image_url:    Option<String>,
	pub is_available: bool,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = dish)]
pub struct NewDish {
	pub name:         String,
	pub description:  Option<String>,
	pub price_cents:  i32,
	pub category:     String,
	pub image_url:    Option<String>,
	pub is_available: bool,
}

/// Field updates for a dish, unset fields keep their value
#[derive(AsChangeset, Clone, Debug, Default, Deserialize)]
#[diesel(table_name = dish)]
pub struct DishUpdate {
	pub name:         Option<String>,
	pub description:  Option<String>,
	pub price_cents:  Option<i32>,
	pub category:     Option<String>,
	pub image_url:    Option<String>,
	pub is_available: Option<bool>,
}

impl NewDish {
	/// Insert this [`NewDish`]
	pub(crate) async fn insert(self, conn: &DbConn) -> Result<Dish, Error> {
		let created = conn
			.interact(|conn| {
				diesel::insert_into(dish::table)
					.values(self)
					.returning(Dish::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(created)
	}
}

impl Dish {
	/// Get a [`Dish`] given its id
	pub(crate) async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let found = conn
			.interact(move |conn| {
				dish::table.find(query_id).first(conn).optional()
			})
			.await??;

		found.ok_or_else(|| Error::NotFound(format!("dish {query_id}")))
	}

	/// Available dishes ordered by category then name
	pub(crate) async fn menu(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let dishes = conn
			.interact(|conn| {
				dish::table
					.filter(dish::is_available.eq(true))
					.order((dish::category.asc(), dish::name.asc()))
					.load(conn)
			})
			.await??;

		Ok(dishes)
	}

	/// All dishes, including unavailable ones, ordered by category then name
	pub(crate) async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let dishes = conn
			.interact(|conn| {
				dish::table
					.order((dish::category.asc(), dish::name.asc()))
					.load(conn)
			})
			.await??;

		Ok(dishes)
	}

	/// Total and available dish counts
	pub(crate) async fn counts(conn: &DbConn) -> Result<(i64, i64), Error> {
		let counts = conn
			.interact(|conn| {
				let total = dish::table.count().get_result(conn)?;
				let available = dish::table
					.filter(dish::is_available.eq(true))
					.count()
					.get_result(conn)?;

				Ok::<_, diesel::result::Error>((total, available))
			})
			.await??;

		Ok(counts)
	}

	/// Apply an update to a [`Dish`]
	pub(crate) async fn update(
		query_id: i32,
		update: DishUpdate,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let updated = conn
			.interact(move |conn| {
				diesel::update(dish::table.find(query_id))
					.set((update, dish::updated_at.eq(diesel::dsl::now)))
					.returning(Self::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??;

		updated.ok_or_else(|| Error::NotFound(format!("dish {query_id}")))
	}

	/// Delete a [`Dish`] given its id
	pub(crate) async fn delete(query_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				diesel::delete(dish::table.find(query_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!("dish {query_id}")));
		}

		Ok(())
	}
}
