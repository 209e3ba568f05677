pub mod garage_controller;
