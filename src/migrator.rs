use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_usuarios_table::Migration),
            Box::new(m20240601_000002_create_tipos_formato_table::Migration),
            Box::new(m20240601_000003_create_sistemas_bms_table::Migration),
            Box::new(m20240601_000004_create_agentes_ia_table::Migration),
            Box::new(m20240601_000005_create_documentos_table::Migration),
            Box::new(m20240601_000006_create_historial_documentos_table::Migration),
            Box::new(m20240601_000007_create_metricas_sistema_table::Migration),
        ]
    }
}

/// Non-unique index over a single reference column. References between tables
/// are plain integer columns; dependents are cleaned up by the services.
fn lookup_index<T, C>(name: &str, table: T, col: C) -> IndexCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIndexColumn,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(col)
        .to_owned()
}

// Migration implementations

mod m20240601_000001_create_usuarios_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_usuarios_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Usuarios::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Usuarios::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Usuarios::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Usuarios::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Usuarios::Nombre).string().not_null())
                        .col(ColumnDef::new(Usuarios::Apellido).string().not_null())
                        .col(ColumnDef::new(Usuarios::Rol).string().not_null())
                        .col(ColumnDef::new(Usuarios::Empresa).string().not_null())
                        .col(ColumnDef::new(Usuarios::Especialidad).string().null())
                        .col(
                            ColumnDef::new(Usuarios::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Usuarios::FechaCreacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Usuarios::FechaActualizacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_usuarios_activo",
                    Usuarios::Table,
                    Usuarios::Activo,
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Usuarios::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Usuarios {
        Table,
        Id,
        Email,
        PasswordHash,
        Nombre,
        Apellido,
        Rol,
        Empresa,
        Especialidad,
        Activo,
        FechaCreacion,
        FechaActualizacion,
    }
}

mod m20240601_000002_create_tipos_formato_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_tipos_formato_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(TiposFormato::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TiposFormato::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TiposFormato::Codigo)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(TiposFormato::Nombre).string().not_null())
                        .col(ColumnDef::new(TiposFormato::Descripcion).string().null())
                        .col(ColumnDef::new(TiposFormato::Plantilla).text().null())
                        .col(
                            ColumnDef::new(TiposFormato::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TiposFormato::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum TiposFormato {
        Table,
        Id,
        Codigo,
        Nombre,
        Descripcion,
        Plantilla,
        Activo,
    }
}

mod m20240601_000003_create_sistemas_bms_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_sistemas_bms_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SistemasBms::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SistemasBms::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SistemasBms::Nombre).string().not_null())
                        .col(ColumnDef::new(SistemasBms::Descripcion).string().null())
                        .col(
                            ColumnDef::new(SistemasBms::ProtocoloComunicacion)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(SistemasBms::Fabricante).string().null())
                        .col(ColumnDef::new(SistemasBms::UsuarioId).integer().null())
                        .col(
                            ColumnDef::new(SistemasBms::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(SistemasBms::FechaCreacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_sistemas_bms_usuario_id",
                    SistemasBms::Table,
                    SistemasBms::UsuarioId,
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SistemasBms::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SistemasBms {
        #[sea_orm(iden = "sistemas_bms")]
        Table,
        Id,
        Nombre,
        Descripcion,
        ProtocoloComunicacion,
        Fabricante,
        UsuarioId,
        Activo,
        FechaCreacion,
    }
}

mod m20240601_000004_create_agentes_ia_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000004_create_agentes_ia_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AgentesIa::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AgentesIa::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AgentesIa::Nombre).string().not_null())
                        .col(ColumnDef::new(AgentesIa::Descripcion).string().null())
                        .col(ColumnDef::new(AgentesIa::SistemaId).integer().null())
                        .col(ColumnDef::new(AgentesIa::TipoFormatoId).integer().null())
                        .col(ColumnDef::new(AgentesIa::Configuracion).text().null())
                        .col(
                            ColumnDef::new(AgentesIa::ModeloIa)
                                .string()
                                .not_null()
                                .default("gemini-pro"),
                        )
                        .col(
                            ColumnDef::new(AgentesIa::Activo)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(AgentesIa::FechaCreacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_agentes_ia_sistema_id",
                    AgentesIa::Table,
                    AgentesIa::SistemaId,
                ))
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_agentes_ia_tipo_formato_id",
                    AgentesIa::Table,
                    AgentesIa::TipoFormatoId,
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AgentesIa::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AgentesIa {
        #[sea_orm(iden = "agentes_ia")]
        Table,
        Id,
        Nombre,
        Descripcion,
        SistemaId,
        TipoFormatoId,
        Configuracion,
        #[sea_orm(iden = "modelo_ia")]
        ModeloIa,
        Activo,
        FechaCreacion,
    }
}

mod m20240601_000005_create_documentos_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000005_create_documentos_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Documentos::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Documentos::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Documentos::Titulo).string().not_null())
                        .col(ColumnDef::new(Documentos::Contenido).text().not_null())
                        .col(ColumnDef::new(Documentos::TipoFormatoId).integer().null())
                        .col(ColumnDef::new(Documentos::SistemaId).integer().null())
                        .col(ColumnDef::new(Documentos::UsuarioId).integer().null())
                        .col(ColumnDef::new(Documentos::AgenteId).integer().null())
                        .col(
                            ColumnDef::new(Documentos::Estado)
                                .string()
                                .not_null()
                                .default("BORRADOR"),
                        )
                        .col(
                            ColumnDef::new(Documentos::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(Documentos::Observaciones).text().null())
                        .col(ColumnDef::new(Documentos::Calificacion).integer().null())
                        .col(
                            ColumnDef::new(Documentos::FechaCreacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Documentos::FechaActualizacion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            for (name, col) in [
                ("idx_documentos_usuario_id", Documentos::UsuarioId),
                ("idx_documentos_sistema_id", Documentos::SistemaId),
                ("idx_documentos_tipo_formato_id", Documentos::TipoFormatoId),
                ("idx_documentos_estado", Documentos::Estado),
            ] {
                manager
                    .create_index(lookup_index(name, Documentos::Table, col))
                    .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Documentos::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum Documentos {
        Table,
        Id,
        Titulo,
        Contenido,
        TipoFormatoId,
        SistemaId,
        UsuarioId,
        AgenteId,
        Estado,
        Version,
        Observaciones,
        Calificacion,
        FechaCreacion,
        FechaActualizacion,
    }
}

mod m20240601_000006_create_historial_documentos_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000006_create_historial_documentos_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(HistorialDocumentos::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HistorialDocumentos::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HistorialDocumentos::DocumentoId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(HistorialDocumentos::UsuarioId)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(HistorialDocumentos::Accion)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(HistorialDocumentos::Detalles).text().null())
                        .col(
                            ColumnDef::new(HistorialDocumentos::FechaAccion)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_historial_documentos_documento_id",
                    HistorialDocumentos::Table,
                    HistorialDocumentos::DocumentoId,
                ))
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_historial_documentos_usuario_id",
                    HistorialDocumentos::Table,
                    HistorialDocumentos::UsuarioId,
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HistorialDocumentos::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum HistorialDocumentos {
        Table,
        Id,
        DocumentoId,
        UsuarioId,
        Accion,
        Detalles,
        FechaAccion,
    }
}

mod m20240601_000007_create_metricas_sistema_table {
    use super::lookup_index;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000007_create_metricas_sistema_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MetricasSistema::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MetricasSistema::Id)
                                .integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MetricasSistema::DocumentoId).integer().null())
                        .col(
                            ColumnDef::new(MetricasSistema::TiempoGeneracionSegundos)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MetricasSistema::ErroresDetectados)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MetricasSistema::ObservacionesCalidad)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(MetricasSistema::SatisfaccionUsuario)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MetricasSistema::FechaMetricas)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(lookup_index(
                    "idx_metricas_sistema_documento_id",
                    MetricasSistema::Table,
                    MetricasSistema::DocumentoId,
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MetricasSistema::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MetricasSistema {
        Table,
        Id,
        DocumentoId,
        TiempoGeneracionSegundos,
        ErroresDetectados,
        ObservacionesCalidad,
        SatisfaccionUsuario,
        FechaMetricas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn migrations_create_every_table_and_roll_back() {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        for table in [
            "usuarios",
            "tipos_formato",
            "sistemas_bms",
            "agentes_ia",
            "documentos",
            "historial_documentos",
            "metricas_sistema",
        ] {
            assert!(manager.has_table(table).await.unwrap(), "{table} missing");
        }
        assert!(manager
            .has_index("metricas_sistema", "idx_metricas_sistema_documento_id")
            .await
            .unwrap());

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("usuarios").await.unwrap());
    }
}
