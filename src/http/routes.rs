//! Route table shared by the router, the startup banner and the landing page.

use std::net::SocketAddr;

pub const PRODUCTS: &str = "/products";
pub const PRODUCT: &str = "/products/{id}";
pub const LANDING: &str = "/";

/// One entry of the public route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const ROUTE_TABLE: [RouteInfo; 6] = [
    RouteInfo {
        method: "GET",
        path: LANDING,
        description: "landing page",
    },
    RouteInfo {
        method: "GET",
        path: PRODUCTS,
        description: "list all products",
    },
    RouteInfo {
        method: "GET",
        path: PRODUCT,
        description: "get a product by id",
    },
    RouteInfo {
        method: "POST",
        path: PRODUCTS,
        description: "create a product",
    },
    RouteInfo {
        method: "PUT",
        path: PRODUCT,
        description: "update a product",
    },
    RouteInfo {
        method: "DELETE",
        path: PRODUCT,
        description: "delete a product",
    },
];

/// Banner lines naming the bound address and every route.
pub fn route_banner(address: &SocketAddr) -> Vec<String> {
    let mut lines = vec![format!("Server listening on http://{}", address)];
    lines.extend(ROUTE_TABLE.iter().map(|route| {
        format!(
            "  {:<6} {:<15} - {}",
            route.method, route.path, route.description
        )
    }));
    lines
}

/// Print the startup banner to stdout whatever the log filter, and record
/// the address in the log.
pub fn print_route_table(address: &SocketAddr) {
    tracing::info!(address = %address, "Server listening");
    for line in route_banner(address) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lists_address_and_routes() {
        let address: SocketAddr = "127.0.0.1:3000".parse().unwrap();
        let lines = route_banner(&address);

        assert_eq!(lines.len(), 1 + ROUTE_TABLE.len());
        assert_eq!(lines[0], "Server listening on http://127.0.0.1:3000");
        assert_eq!(lines[2], "  GET    /products       - list all products");
        assert!(lines[6].contains("DELETE /products/{id}"));
    }
}
