//! The full collection set.

use landgrid_types::{Booking, City, Colony, ObjectId, Plot, Property, Role, User};

use crate::collection::{Collection, Document};

impl Document for City {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for Colony {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for Plot {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for Property {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for User {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for Role {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

impl Document for Booking {
    fn id(&self) -> &ObjectId {
        &self.id
    }
}

/// Every collection in the system, owned together.
///
/// Ownership of the whole set by one value is what gives the service layer
/// its interleaving model: within one request the sequence of store calls is
/// strictly ordered, and nothing spans two collections atomically.
#[derive(Debug, Clone)]
pub struct Database {
    pub cities: Collection<City>,
    pub colonies: Collection<Colony>,
    pub plots: Collection<Plot>,
    pub properties: Collection<Property>,
    pub users: Collection<User>,
    pub roles: Collection<Role>,
    pub bookings: Collection<Booking>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            cities: Collection::new("cities"),
            colonies: Collection::new("colonies"),
            plots: Collection::new("plots"),
            properties: Collection::new("properties"),
            users: Collection::new("users"),
            roles: Collection::new("roles"),
            bookings: Collection::new("bookings"),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
