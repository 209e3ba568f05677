pub mod firestore_dto;
pub mod garage_dto;
