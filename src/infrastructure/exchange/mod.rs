pub mod tradeservices;
