//! Static catalog of Spring Boot starter dependencies the generator knows
//! about. Everything else in the pipeline refers to these entries by id;
//! ids that are not in the catalog are ignored.

/// One selectable starter dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub const DEPENDENCIES: &[Dependency] = &[
    // Developer Tools
    Dependency { id: "devtools", name: "Spring Boot DevTools", description: "Provides fast application restarts, LiveReload, and configurations for enhanced development experience.", category: "Developer Tools" },
    Dependency { id: "lombok", name: "Lombok", description: "Java annotation library which helps to reduce boilerplate code.", category: "Developer Tools" },
    Dependency { id: "configuration-processor", name: "Spring Configuration Processor", description: "Generate metadata for developers to offer contextual help and code completion when working with custom configuration keys.", category: "Developer Tools" },
    Dependency { id: "docker-compose", name: "Docker Compose Support", description: "Provides docker compose support for enhanced development experience.", category: "Developer Tools" },
    Dependency { id: "modulith", name: "Spring Modulith", description: "Support for building modular monolithic applications.", category: "Developer Tools" },
    // Web
    Dependency { id: "web", name: "Spring Web", description: "Build web, including RESTful, applications using Spring MVC. Uses Apache Tomcat as the default embedded container.", category: "Web" },
    Dependency { id: "webflux", name: "Spring Reactive Web", description: "Build reactive web applications with Spring WebFlux and Netty.", category: "Web" },
    Dependency { id: "graphql", name: "Spring for GraphQL", description: "Build GraphQL applications with Spring for GraphQL and GraphQL Java.", category: "Web" },
    Dependency { id: "data-rest", name: "Rest Repositories", description: "Exposing Spring Data repositories over REST via Spring Data REST.", category: "Web" },
    Dependency { id: "hateoas", name: "Spring HATEOAS", description: "Eases the creation of RESTful APIs that follow the HATEOAS principle when working with Spring / Spring MVC.", category: "Web" },
    Dependency { id: "web-services", name: "Spring Web Services", description: "Facilitates contract-first SOAP development.", category: "Web" },
    // Template Engines
    Dependency { id: "thymeleaf", name: "Thymeleaf", description: "A modern server-side Java template engine for both web and standalone environments.", category: "Template Engines" },
    Dependency { id: "mustache", name: "Mustache", description: "Logic-less templates for both web and standalone environments.", category: "Template Engines" },
    // Security
    Dependency { id: "security", name: "Spring Security", description: "Highly customizable authentication and access-control framework for Spring applications.", category: "Security" },
    Dependency { id: "oauth2-client", name: "OAuth2 Client", description: "Spring Boot integration for Spring Security's OAuth2/OpenID Connect client features.", category: "Security" },
    Dependency { id: "oauth2-resource-server", name: "OAuth2 Resource Server", description: "Spring Boot integration for Spring Security's OAuth2 resource server features.", category: "Security" },
    Dependency { id: "data-ldap", name: "Spring LDAP", description: "Makes it easier to build Spring based applications that use the Lightweight Directory Access Protocol.", category: "Security" },
    // SQL
    Dependency { id: "jdbc", name: "JDBC API", description: "Database Connectivity API that defines how a client may connect and query a database.", category: "SQL" },
    Dependency { id: "data-jpa", name: "Spring Data JPA", description: "Persist data in SQL stores with Java Persistence API using Spring Data and Hibernate.", category: "SQL" },
    Dependency { id: "data-jdbc", name: "Spring Data JDBC", description: "Persist data in SQL stores with plain JDBC using Spring Data.", category: "SQL" },
    Dependency { id: "data-r2dbc", name: "Spring Data R2DBC", description: "Provides Reactive Relational Database Connectivity to persist data in SQL stores using Spring Data in reactive applications.", category: "SQL" },
    Dependency { id: "liquibase", name: "Liquibase Migration", description: "Liquibase database migration and source control library.", category: "SQL" },
    Dependency { id: "flyway", name: "Flyway Migration", description: "Version control for your database so you can migrate from any version to the latest version of the schema.", category: "SQL" },
    Dependency { id: "h2", name: "H2 Database", description: "Provides a fast in-memory database that supports JDBC API and R2DBC access, with a small footprint.", category: "SQL" },
    Dependency { id: "mariadb", name: "MariaDB Driver", description: "MariaDB JDBC and R2DBC driver.", category: "SQL" },
    Dependency { id: "sqlserver", name: "MS SQL Server Driver", description: "A JDBC and R2DBC driver that provides access to Microsoft SQL Server and Azure SQL Database from any Java application.", category: "SQL" },
    Dependency { id: "mysql", name: "MySQL Driver", description: "MySQL JDBC driver.", category: "SQL" },
    Dependency { id: "oracle", name: "Oracle Driver", description: "A JDBC driver that provides access to Oracle.", category: "SQL" },
    Dependency { id: "postgresql", name: "PostgreSQL Driver", description: "A JDBC and R2DBC driver that allows Java programs to connect to a PostgreSQL database using standard, database independent Java code.", category: "SQL" },
    // NoSQL
    Dependency { id: "data-redis", name: "Spring Data Redis (Access+Driver)", description: "Advanced and thread-safe Java Redis client for synchronous, asynchronous, and reactive usage.", category: "NoSQL" },
    Dependency { id: "data-mongodb", name: "Spring Data MongoDB", description: "Store data in flexible, JSON-like documents, meaning fields can vary from document to document.", category: "NoSQL" },
    Dependency { id: "data-elasticsearch", name: "Spring Data Elasticsearch (Access+Driver)", description: "A distributed, RESTful search and analytics engine with Spring Data Elasticsearch.", category: "NoSQL" },
    Dependency { id: "data-cassandra", name: "Spring Data for Apache Cassandra", description: "A free and open-source, distributed, NoSQL database management system.", category: "NoSQL" },
    Dependency { id: "data-neo4j", name: "Spring Data Neo4j", description: "An open source NoSQL database that stores data structured as graphs consisting of nodes, connected by relationships.", category: "NoSQL" },
    // Messaging
    Dependency { id: "amqp", name: "Spring for RabbitMQ", description: "Gives your applications a common platform to send and receive messages.", category: "Messaging" },
    Dependency { id: "kafka", name: "Spring for Apache Kafka", description: "Publish, subscribe, store, and process streams of records.", category: "Messaging" },
    Dependency { id: "websocket", name: "WebSocket", description: "Build Servlet-based WebSocket applications with SockJS and STOMP.", category: "Messaging" },
    Dependency { id: "rsocket", name: "RSocket", description: "RSocket.io applications with Spring Messaging and Netty.", category: "Messaging" },
    // I/O
    Dependency { id: "batch", name: "Spring Batch", description: "Batch applications with transactions, retry/skip and chunk based processing.", category: "I/O" },
    Dependency { id: "validation", name: "Validation", description: "Bean Validation with Hibernate validator.", category: "I/O" },
    Dependency { id: "mail", name: "Java Mail Sender", description: "Send email using Java Mail and Spring Framework's JavaMailSender.", category: "I/O" },
    Dependency { id: "quartz", name: "Quartz Scheduler", description: "Schedule jobs using Quartz.", category: "I/O" },
    Dependency { id: "cache", name: "Spring Cache Abstraction", description: "Provides cache-related operations, such as the ability to update the content of the cache.", category: "I/O" },
    // Ops
    Dependency { id: "actuator", name: "Spring Boot Actuator", description: "Supports built in (or custom) endpoints that let you monitor and manage your application.", category: "Ops" },
    Dependency { id: "sbom-cyclone-dx", name: "CycloneDX SBOM support", description: "Creates a Software Bill of Materials in CycloneDX format.", category: "Ops" },
    // Observability
    Dependency { id: "prometheus", name: "Prometheus", description: "Expose Micrometer metrics in Prometheus format.", category: "Observability" },
    Dependency { id: "zipkin", name: "Zipkin", description: "Enable and expose span and trace IDs to Zipkin.", category: "Observability" },
    Dependency { id: "distributed-tracing", name: "Distributed Tracing", description: "Enable span and trace IDs in logs.", category: "Observability" },
    // Testing
    Dependency { id: "restdocs", name: "Spring REST Docs", description: "Document RESTful services by combining hand-written documentation with auto-generated snippets.", category: "Testing" },
    Dependency { id: "testcontainers", name: "Testcontainers", description: "Provide lightweight, throwaway instances of common databases that can run in a Docker container.", category: "Testing" },
];

pub fn find(id: &str) -> Option<&'static Dependency> {
    DEPENDENCIES.iter().find(|dep| dep.id == id)
}

/// Resolve a list of selected ids against the catalog, keeping selection
/// order. Unknown ids are dropped silently.
pub fn resolve(ids: &[String]) -> Vec<&'static Dependency> {
    ids.iter().filter_map(|id| find(id)).collect()
}

/// The catalog grouped by category, in catalog order, for display.
pub fn by_category() -> Vec<(&'static str, Vec<&'static Dependency>)> {
    let mut groups: Vec<(&'static str, Vec<&'static Dependency>)> = Vec::new();
    for dep in DEPENDENCIES {
        match groups.iter_mut().find(|(category, _)| *category == dep.category) {
            Some((_, entries)) => entries.push(dep),
            None => groups.push((dep.category, vec![dep])),
        }
    }
    groups
}
