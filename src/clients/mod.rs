pub mod ecourts;
