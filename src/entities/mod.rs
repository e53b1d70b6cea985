pub mod country;
pub mod director;
pub mod film;
pub mod film_genre;
pub mod genre;
pub mod role;
pub mod user;
