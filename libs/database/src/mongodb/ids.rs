use mongodb::bson::{Binary, Bson, Document, doc, spec::BinarySubtype};
use uuid::Uuid;

/// A `Uuid` in the form the driver writes it.
///
/// Documents go through the non-human-readable BSON serializer on insert and
/// replace, so `Uuid` fields are stored as generic binary, not strings.
/// Filters on those fields must use this value.
pub fn uuid_to_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

pub fn uuids_to_bson(ids: &[Uuid]) -> Vec<Bson> {
    ids.iter().copied().map(uuid_to_bson).collect()
}

/// `{ "_id": <id> }`
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_to_bson(id) }
}
