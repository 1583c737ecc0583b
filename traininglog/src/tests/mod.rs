// Shared fixtures
mod fixtures;

// Extraction tests
mod extraction;



// Serializer tests
mod serializers;
