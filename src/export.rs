//! Archive assembly: pom.xml from the coordinate table, bootstrap
//! application class, properties stub, Maven wrapper scripts, and every
//! generated file at its declared path, packaged into one zip named after
//! the artifact id.

use std::io::{Seek, Write};

use anyhow::Result;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::catalog::Dependency;
use crate::project::ProjectMetadata;
use crate::recovery::GeneratedFile;

/// Maven coordinates for a catalog id. Catalog ids without an entry here
/// are dropped from the manifest silently.
#[derive(Debug, Clone, Copy)]
pub struct MavenCoordinate {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub scope: Option<&'static str>,
    pub optional: bool,
}

const MAVEN_COORDINATES: &[(&str, MavenCoordinate)] = &[
    // Developer Tools
    ("devtools", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-devtools", scope: Some("runtime"), optional: true }),
    ("lombok", MavenCoordinate { group_id: "org.projectlombok", artifact_id: "lombok", scope: None, optional: true }),
    ("configuration-processor", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-configuration-processor", scope: None, optional: true }),
    // Web
    ("web", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-web", scope: None, optional: false }),
    ("webflux", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-webflux", scope: None, optional: false }),
    ("graphql", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-graphql", scope: None, optional: false }),
    ("data-rest", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-data-rest", scope: None, optional: false }),
    ("hateoas", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-hateoas", scope: None, optional: false }),
    ("thymeleaf", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-thymeleaf", scope: None, optional: false }),
    // Security
    ("security", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-security", scope: None, optional: false }),
    ("oauth2-client", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-oauth2-client", scope: None, optional: false }),
    ("oauth2-resource-server", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-oauth2-resource-server", scope: None, optional: false }),
    // SQL
    ("jdbc", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-jdbc", scope: None, optional: false }),
    ("data-jpa", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-data-jpa", scope: None, optional: false }),
    ("h2", MavenCoordinate { group_id: "com.h2database", artifact_id: "h2", scope: Some("runtime"), optional: false }),
    ("mysql", MavenCoordinate { group_id: "com.mysql", artifact_id: "mysql-connector-j", scope: Some("runtime"), optional: false }),
    ("postgresql", MavenCoordinate { group_id: "org.postgresql", artifact_id: "postgresql", scope: Some("runtime"), optional: false }),
    ("sqlserver", MavenCoordinate { group_id: "com.microsoft.sqlserver", artifact_id: "mssql-jdbc", scope: Some("runtime"), optional: false }),
    ("oracle", MavenCoordinate { group_id: "com.oracle.database.jdbc", artifact_id: "ojdbc11", scope: Some("runtime"), optional: false }),
    ("mariadb", MavenCoordinate { group_id: "org.mariadb.jdbc", artifact_id: "mariadb-java-client", scope: Some("runtime"), optional: false }),
    ("flyway", MavenCoordinate { group_id: "org.flywaydb", artifact_id: "flyway-core", scope: None, optional: false }),
    ("liquibase", MavenCoordinate { group_id: "org.liquibase", artifact_id: "liquibase-core", scope: None, optional: false }),
    // I/O
    ("validation", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-validation", scope: None, optional: false }),
    ("mail", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-mail", scope: None, optional: false }),
    ("batch", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-batch", scope: None, optional: false }),
    ("quartz", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-quartz", scope: None, optional: false }),
    ("cache", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-cache", scope: None, optional: false }),
    // Messaging
    ("amqp", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-amqp", scope: None, optional: false }),
    ("kafka", MavenCoordinate { group_id: "org.springframework.kafka", artifact_id: "spring-kafka", scope: None, optional: false }),
    ("websocket", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-websocket", scope: None, optional: false }),
    // Ops
    ("actuator", MavenCoordinate { group_id: "org.springframework.boot", artifact_id: "spring-boot-starter-actuator", scope: None, optional: false }),
];

fn maven_coordinate(id: &str) -> Option<&'static MavenCoordinate> {
    MAVEN_COORDINATES
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, coordinate)| coordinate)
}

fn dependency_xml(coordinate: &MavenCoordinate) -> String {
    let mut xml = format!(
        "\n        <dependency>\n            <groupId>{}</groupId>\n            <artifactId>{}</artifactId>",
        coordinate.group_id, coordinate.artifact_id
    );
    if let Some(scope) = coordinate.scope {
        xml.push_str(&format!("\n            <scope>{scope}</scope>"));
    }
    if coordinate.optional {
        xml.push_str("\n            <optional>true</optional>");
    }
    xml.push_str("\n        </dependency>");
    xml
}

/// Render the Maven build manifest for the selected dependencies.
pub fn pom_xml(meta: &ProjectMetadata, dependencies: &[&Dependency]) -> String {
    let dependency_block: String = dependencies
        .iter()
        .filter_map(|dep| maven_coordinate(dep.id))
        .map(dependency_xml)
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>3.3.1</version>
        <relativePath/>
    </parent>
    <groupId>{group}</groupId>
    <artifactId>{artifact}</artifactId>
    <version>0.0.1-SNAPSHOT</version>
    <name>{name}</name>
    <description>{description}</description>
    <properties>
        <java.version>{java_version}</java.version>
    </properties>
    <dependencies>
        {dependency_block}
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-test</artifactId>
            <scope>test</scope>
        </dependency>
    </dependencies>

    <build>
        <plugins>
            <plugin>
                <groupId>org.springframework.boot</groupId>
                <artifactId>spring-boot-maven-plugin</artifactId>
                <configuration>
                    <excludes>
                        <exclude>
                            <groupId>org.projectlombok</groupId>
                            <artifactId>lombok</artifactId>
                        </exclude>
                    </excludes>
                </configuration>
            </plugin>
        </plugins>
    </build>

</project>
"#,
        group = meta.group,
        artifact = meta.artifact,
        name = meta.name,
        description = meta.description,
        java_version = meta.java_version,
        dependency_block = dependency_block,
    )
}

/// Class-name stem for the bootstrap entry point: split the display name on
/// hyphens, underscores and spaces, capitalize each segment.
pub fn bootstrap_class_name(display_name: &str) -> String {
    display_name
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn main_application_source(meta: &ProjectMetadata, class_name: &str) -> String {
    format!(
        r#"package {package};

import org.springframework.boot.SpringApplication;
import org.springframework.boot.autoconfigure.SpringBootApplication;

@SpringBootApplication
public class {class_name}Application {{

    public static void main(String[] args) {{
        SpringApplication.run({class_name}Application.class, args);
    }}

}}
"#,
        package = meta.package_name,
        class_name = class_name,
    )
}

pub fn application_properties() -> &'static str {
    r#"# Server Configuration
server.port=8080

# Database Configuration (Update with your details)
# H2 (In-Memory) Example:
# spring.datasource.url=jdbc:h2:mem:testdb
# spring.datasource.driverClassName=org.h2.Driver
# spring.datasource.username=sa
# spring.datasource.password=password
# spring.jpa.database-platform=org.hibernate.dialect.H2Dialect

# MySQL Example:
# spring.datasource.url=jdbc:mysql://localhost:3306/your_database?useSSL=false&serverTimezone=UTC
# spring.datasource.username=your_username
# spring.datasource.password=your_password
# spring.jpa.hibernate.ddl-auto=update
# spring.jpa.properties.hibernate.dialect=org.hibernate.dialect.MySQLDialect

# PostgreSQL Example:
# spring.datasource.url=jdbc:postgresql://localhost:5432/your_database
# spring.datasource.username=your_username
# spring.datasource.password=your_password
# spring.jpa.hibernate.ddl-auto=update
# spring.jpa.properties.hibernate.dialect=org.hibernate.dialect.PostgreSQLDialect

# JPA/Hibernate Configuration
spring.jpa.show-sql=true
spring.jpa.hibernate.ddl-auto=update
"#
}

/// Maven wrapper assets shipped verbatim into every archive.
const MVNW_SCRIPT: &str = include_str!("static/mvnw");
const MVNW_CMD_SCRIPT: &str = include_str!("static/mvnw.cmd");
const MAVEN_WRAPPER_PROPS: &str = "wrapperUrl=https://repo.maven.apache.org/maven2/org/apache/maven/wrapper/maven-wrapper/3.2.0/maven-wrapper-3.2.0.jar\n";

/// Suggested archive file name for a project.
pub fn archive_file_name(meta: &ProjectMetadata) -> String {
    format!("{}.zip", meta.artifact)
}

/// Write the complete starter project into `writer` as a zip archive.
pub fn write_archive<W: Write + Seek>(
    writer: W,
    meta: &ProjectMetadata,
    dependencies: &[&Dependency],
    files: &[GeneratedFile],
) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let plain = SimpleFileOptions::default();
    let executable = SimpleFileOptions::default().unix_permissions(0o755);

    zip.start_file("pom.xml", plain)?;
    zip.write_all(pom_xml(meta, dependencies).as_bytes())?;

    zip.start_file("mvnw", executable)?;
    zip.write_all(MVNW_SCRIPT.as_bytes())?;
    zip.start_file("mvnw.cmd", plain)?;
    zip.write_all(MVNW_CMD_SCRIPT.as_bytes())?;
    zip.start_file(".mvn/wrapper/maven-wrapper.properties", plain)?;
    zip.write_all(MAVEN_WRAPPER_PROPS.as_bytes())?;

    zip.start_file("src/main/resources/application.properties", plain)?;
    zip.write_all(application_properties().as_bytes())?;

    let class_name = bootstrap_class_name(&meta.name);
    let package_path = meta.package_name.replace('.', "/");
    zip.start_file(
        format!("src/main/java/{package_path}/{class_name}Application.java"),
        plain,
    )?;
    zip.write_all(main_application_source(meta, &class_name).as_bytes())?;

    for file in files {
        zip.start_file(file.path.as_str(), plain)?;
        zip.write_all(file.content.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}
