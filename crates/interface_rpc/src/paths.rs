//! Call paths shared by the routers and the clients

pub mod catalog {
    pub const PUT_PRODUCT: &str = "/rpc/catalog/PutProduct";
    pub const POST_PRODUCT: &str = "/rpc/catalog/PostProduct";
    pub const GET_PRODUCT: &str = "/rpc/catalog/GetProduct";
    pub const LIST_PRODUCTS: &str = "/rpc/catalog/ListProducts";
    pub const LIST_PRODUCTS_WITH_IDS: &str = "/rpc/catalog/ListProductsWithIds";
    pub const SEARCH_PRODUCTS: &str = "/rpc/catalog/SearchProducts";
}

pub mod account {
    pub const POST_ACCOUNT: &str = "/rpc/account/PostAccount";
    pub const GET_ACCOUNT: &str = "/rpc/account/GetAccount";
    pub const LIST_ACCOUNTS: &str = "/rpc/account/ListAccounts";
}

pub mod order {
    pub const POST_ORDER: &str = "/rpc/order/PostOrder";
    pub const GET_ORDER: &str = "/rpc/order/GetOrder";
    pub const GET_ORDERS_FOR_ACCOUNT: &str = "/rpc/order/GetOrdersForAccount";
    pub const GET_ORDERS_FOR_ACCOUNTS: &str = "/rpc/order/GetOrdersForAccounts";
}
