mod db;
mod unit;
